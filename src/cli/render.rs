// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use crate::cli::args::RenderArgs;
use crate::config::OverlayConfig;
use crate::error::Result;

#[cfg(feature = "annotate")]
use std::path::{Path, PathBuf};
#[cfg(feature = "annotate")]
use std::time::Instant;

#[cfg(feature = "annotate")]
use rayon::prelude::*;

#[cfg(feature = "annotate")]
use crate::annotate::{find_next_run_dir, render_overlay, save_render};
#[cfg(feature = "annotate")]
use crate::cli::{load_engine, resolve_geometry};
#[cfg(feature = "annotate")]
use crate::playback::PlaybackTimeline;
#[cfg(feature = "annotate")]
use crate::utils::pluralize;
#[cfg(feature = "annotate")]
use crate::{section, success, verbose, warn};

/// Build the drawing configuration from command-line options.
#[must_use]
pub fn config_from_args(args: &RenderArgs) -> OverlayConfig {
    let mut config = OverlayConfig::new()
        .with_bone_width(args.bone_width)
        .with_joint_radius(args.joint_radius)
        .with_bone_color(args.bone_color)
        .with_joint_color(args.joint_color)
        .with_limb_colors(args.limb_colors)
        .with_bones(!args.no_bones)
        .with_joints(!args.no_joints)
        .with_poll_interval(args.step);
    if let Some(min_vis) = args.payload.min_vis {
        config = config.with_min_visibility(min_vis);
    }
    config
}

/// Output file name for a rendered position.
#[cfg(feature = "annotate")]
fn render_path(dir: &Path, position_ms: u64) -> PathBuf {
    dir.join(format!("overlay_{position_ms:07}.png"))
}

/// Render overlay frames for one position or a full replay of the series.
///
/// # Errors
///
/// Returns an error if the payload, geometry or options are invalid, or if an
/// image cannot be read or written.
#[cfg(feature = "annotate")]
#[allow(clippy::cast_precision_loss)]
pub fn run_render(args: &RenderArgs) -> Result<()> {
    let config = config_from_args(args);
    config.validate()?;

    let (geometry, viewport) = resolve_geometry(&args.geometry)?;
    let (_, engine) = load_engine(&args.payload, Some(geometry.display_size()))?;
    let engine = engine.with_config(&config);

    let background = args
        .background
        .as_ref()
        .map(image::open)
        .transpose()?;
    if let Some(bg) = &background {
        let display = geometry.display_size();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let expected = (display.width.round() as u32, display.height.round() as u32);
        if (bg.width(), bg.height()) != expected {
            warn!(
                "Background is {}x{} but the display frame is {}; it will be stretched",
                bg.width(),
                bg.height(),
                display
            );
        }
    }

    let positions: Vec<u64> = match args.at {
        Some(at) => vec![at],
        None => {
            PlaybackTimeline::for_series(engine.series(), Some(config.poll_interval_ms)).collect()
        }
    };

    let out_dir = args
        .output
        .clone()
        .unwrap_or_else(|| find_next_run_dir(Path::new("runs/overlay"), "render"));

    section!(
        "Rendering {} at {} (display rect {})",
        pluralize(positions.len(), "position"),
        viewport,
        crate::viewport::DisplayRect::fit(viewport, geometry.display_size())
    );

    let start = Instant::now();
    let empty = positions
        .par_iter()
        .map(|&position| -> Result<bool> {
            let (image, scene) = render_overlay(
                &engine,
                position,
                viewport,
                geometry,
                background.as_ref(),
                &config,
            );
            let path = render_path(&out_dir, position);
            save_render(&image, &path)?;
            verbose!(
                "{}: {} joints, {} bones",
                path.display(),
                scene.joints.len(),
                scene.bones.len()
            );
            Ok(scene.is_empty())
        })
        .collect::<Result<Vec<bool>>>()?
        .into_iter()
        .filter(|&e| e)
        .count();

    let elapsed = start.elapsed().as_secs_f64() * 1000.0;
    if empty > 0 {
        warn!(
            "{} rendered without any overlay",
            pluralize(empty, "position")
        );
    }
    success!(
        "Saved {} to {} in {:.1}ms ({:.1}ms per frame)",
        pluralize(positions.len(), "image"),
        out_dir.display(),
        elapsed,
        elapsed / positions.len().max(1) as f64
    );
    Ok(())
}

/// Rendering requires the `annotate` feature.
///
/// # Errors
///
/// Always returns [`crate::OverlayError::FeatureNotEnabled`].
#[cfg(not(feature = "annotate"))]
pub fn run_render(args: &RenderArgs) -> Result<()> {
    config_from_args(args).validate()?;
    Err(crate::OverlayError::FeatureNotEnabled(
        "render requires the 'annotate' feature".to_string(),
    ))
}
