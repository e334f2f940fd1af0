// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for inspecting and rendering pose overlays.
//!
//! This module contains the command-line interface logic, including argument parsing
//! and the `inspect`, `probe` and `render` command implementations.

// Modules
/// CLI arguments.
pub mod args;

/// Console logging macros and verbosity.
pub mod logging;

/// Response summary.
pub mod inspect;

/// Single-position overlay dump.
pub mod probe;

/// PNG rendering.
pub mod render;

use crate::cli::args::{GeometryArgs, PayloadArgs};
use crate::error::{OverlayError, Result};
use crate::payload::AnalyzeResponse;
use crate::viewport::{FrameGeometry, Size};
use crate::OverlayEngine;

/// Load the response and build an engine for its overlay.
///
/// `frame_size` is the display-oriented video size, attached to the series when
/// the command knows it.
pub(crate) fn load_engine(
    args: &PayloadArgs,
    frame_size: Option<Size>,
) -> Result<(AnalyzeResponse, OverlayEngine)> {
    let response = AnalyzeResponse::from_path(&args.payload)?;
    let mut series = response.overlay_series().ok_or_else(|| {
        OverlayError::PayloadError(format!(
            "{} contains no overlay section",
            args.payload.display()
        ))
    })?;
    if let Some(size) = frame_size {
        series = series.with_frame_size(size);
    }

    let mut engine = OverlayEngine::new(series);
    if let Some(min_vis) = args.min_vis {
        engine = engine.with_min_visibility(min_vis);
    }
    Ok((response, engine))
}

/// Resolve frame geometry and viewport from the arguments.
pub(crate) fn resolve_geometry(args: &GeometryArgs) -> Result<(FrameGeometry, Size)> {
    if !args.video.is_positive() {
        return Err(OverlayError::GeometryError(format!(
            "video size must be positive, got {}",
            args.video
        )));
    }
    let geometry = FrameGeometry::new(args.video, args.rotation);
    let viewport = args.viewport.unwrap_or_else(|| geometry.display_size());
    Ok((geometry, viewport))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_payload(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{name}-{}.json", std::process::id()));
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_load_engine_attaches_frame_size() {
        let path = write_payload(
            "swing-overlay-load",
            r#"{ "sessionId": "s", "overlay": { "version": "1", "fps": 30, "coord_space": "px",
                "window_start_ms": 0, "window_end_ms": 0, "min_vis": 0.5, "frames": [] } }"#,
        );
        let args = PayloadArgs {
            payload: path.clone(),
            min_vis: Some(0.8),
        };

        let (_, engine) = load_engine(&args, Some(Size::new(1080.0, 1920.0))).unwrap();
        assert_eq!(engine.series().frame_size(), Some(Size::new(1080.0, 1920.0)));
        assert!((engine.min_visibility() - 0.8).abs() < f32::EPSILON);

        let (_, engine) = load_engine(&args, None).unwrap();
        assert!(engine.series().frame_size().is_none());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_engine_requires_overlay() {
        let path = write_payload("swing-overlay-no-overlay", r#"{ "sessionId": "s" }"#);
        let args = PayloadArgs {
            payload: path.clone(),
            min_vis: None,
        };
        assert!(matches!(
            load_engine(&args, None),
            Err(OverlayError::PayloadError(_))
        ));
        let _ = fs::remove_file(path);
    }
}
