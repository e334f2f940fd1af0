// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use serde_json::{json, Value};

use crate::cli::args::ProbeArgs;
use crate::cli::{load_engine, resolve_geometry};
use crate::error::Result;
use crate::scene::OverlayScene;
use crate::utils::{format_timestamp, pluralize};
use crate::{info, section, verbose, warn};

/// Serialize a composed scene for machine consumption.
#[must_use]
pub fn scene_to_json(scene: &OverlayScene) -> Value {
    json!({
        "position_ms": scene.position_ms,
        "frame_t_ms": scene.frame_timestamp_ms,
        "rect": {
            "left": scene.rect.left,
            "top": scene.rect.top,
            "width": scene.rect.width,
            "height": scene.rect.height,
        },
        "joints": scene.joints.iter().map(|j| json!({
            "index": j.index,
            "x": j.x,
            "y": j.y,
            "vis": j.visibility,
        })).collect::<Vec<_>>(),
        "bones": scene.bones.iter().map(|b| json!({
            "connection": b.connection,
            "start": [b.start.0, b.start.1],
            "end": [b.end.0, b.end.1],
        })).collect::<Vec<_>>(),
    })
}

/// Print the overlay that would be drawn at one playback position.
///
/// # Errors
///
/// Returns an error if the payload cannot be loaded or the geometry is invalid.
pub fn run_probe(args: &ProbeArgs) -> Result<()> {
    let (geometry, viewport) = resolve_geometry(&args.geometry)?;
    let (_, engine) = load_engine(&args.payload, Some(geometry.display_size()))?;
    let scene = OverlayScene::compose(&engine, args.at, viewport, geometry);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scene_to_json(&scene))?);
        return Ok(());
    }

    section!("Position {}", format_timestamp(args.at));
    match scene.frame_timestamp_ms {
        Some(t) => info!("  frame: {} ({} ms)", format_timestamp(t), t),
        None => warn!("No overlay frame available for this position"),
    }
    info!(
        "  video {} rotated {}° → display {}, viewport {}",
        geometry.decoded,
        geometry.rotation.degrees(),
        geometry.display_size(),
        viewport
    );
    info!("  display rect: {}", scene.rect);
    info!(
        "  {}, {}",
        pluralize(scene.joints.len(), "joint"),
        pluralize(scene.bones.len(), "bone")
    );

    for joint in &scene.joints {
        verbose!(
            "    joint {:>2}: ({:.1}, {:.1}) vis {:.2}",
            joint.index,
            joint.x,
            joint.y,
            joint.visibility
        );
    }
    for bone in &scene.bones {
        verbose!(
            "    bone {:>2}: ({:.1}, {:.1}) → ({:.1}, {:.1})",
            bone.connection,
            bone.start.0,
            bone.start.1,
            bone.end.0,
            bone.end.1
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ViewBone, ViewJoint};
    use crate::viewport::DisplayRect;

    #[test]
    fn test_scene_to_json() {
        let scene = OverlayScene {
            position_ms: 150,
            frame_timestamp_ms: Some(100),
            rect: DisplayRect::new(0.0, 218.75, 1000.0, 562.5),
            joints: vec![ViewJoint {
                index: 0,
                x: 10.0,
                y: 20.0,
                visibility: 1.0,
            }],
            bones: vec![ViewBone {
                connection: 0,
                start: (1.0, 2.0),
                end: (3.0, 4.0),
            }],
        };
        let value = scene_to_json(&scene);
        assert_eq!(value["frame_t_ms"], 100);
        assert_eq!(value["rect"]["height"], 562.5);
        assert_eq!(value["joints"].as_array().unwrap().len(), 1);
        assert_eq!(value["bones"][0]["end"][1], 4.0);
    }

    #[test]
    fn test_empty_scene_to_json() {
        let value = scene_to_json(&OverlayScene::default());
        assert!(value["frame_t_ms"].is_null());
        assert!(value["joints"].as_array().unwrap().is_empty());
    }
}
