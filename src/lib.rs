// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Swing Overlay
//!
//! Pose overlay synchronization and viewport mapping for swing analysis videos.
//!
//! An analysis backend returns a time series of body landmarks for an uploaded
//! video. This library keeps that skeleton glued to the picture while the video
//! plays: it picks the landmark frame for the current playback position, filters
//! landmarks by visibility, and maps frame pixels into an aspect-fit (letterboxed)
//! viewport, correcting for the stream's display rotation.
//!
//! ## Features
//!
//! - **Frame sync** - Binary-search lookup of the last frame at or before a position
//! - **Visibility filtering** - Per-series threshold with an optional override
//! - **Letterbox mapping** - Aspect-fit display rectangle and frame/view transforms
//! - **Rotation aware** - Decoded-pixel payloads are rotated into display space once
//! - **Rendering** - PNG renders of the overlay, optionally over a video frame
//!
//! ## Quick Start (Library)
//!
//! ```rust
//! use swing_overlay::{AnalyzeResponse, FrameGeometry, OverlayEngine, OverlayScene, Rotation, Size};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = r#"{
//!     "sessionId": "demo",
//!     "overlay": {
//!         "version": "1", "fps": 30, "coord_space": "video_px",
//!         "connections": [[0, 1]],
//!         "window_start_ms": 0, "window_end_ms": 100, "min_vis": 0.5,
//!         "frames": [
//!             { "t_ms": 0,   "xyv": [[10, 20, 0.9], [30, 40, 0.9]] },
//!             { "t_ms": 100, "xyv": [[15, 25, 0.9], [35, 45, 0.2]] }
//!         ]
//!     }
//! }"#;
//!
//! let response = AnalyzeResponse::from_json(json)?;
//! let engine = OverlayEngine::new(response.overlay_series().ok_or("no overlay")?);
//!
//! let geometry = FrameGeometry::new(Size::new(1920.0, 1080.0), Rotation::None);
//! let scene = OverlayScene::compose(&engine, 150, Size::new(1000.0, 1000.0), geometry);
//!
//! assert_eq!(scene.frame_timestamp_ms, Some(100));
//! assert_eq!(scene.joints.len(), 1);
//! assert!(scene.bones.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Summarize a response
//! swing-overlay inspect --payload analysis.json
//!
//! # Print the overlay for one playback position
//! swing-overlay probe -p analysis.json --at 1500 --video 1920x1080 --rotation 90
//!
//! # Render the whole window to PNGs over a phone-sized viewport
//! swing-overlay render -p analysis.json --video 1920x1080 --viewport 390x844
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use swing_overlay::{visualizer::Color, OverlayConfig};
//!
//! let config = OverlayConfig::new()
//!     .with_bone_width(3.0)
//!     .with_joint_radius(5.0)
//!     .with_bone_color(Color::GREEN)
//!     .with_min_visibility(0.6);
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`payload`] | Wire types for the analysis response ([`AnalyzeResponse`], [`OverlayPayload`]) |
//! | [`series`] | Validated overlay data ([`OverlaySeries`], frames, connections) |
//! | [`engine`] | [`OverlayEngine`]: frame lookup, landmark and bone filtering |
//! | [`viewport`] | Letterbox geometry ([`DisplayRect`], [`FrameGeometry`], [`Rotation`]) |
//! | [`scene`] | View-space overlay for one position ([`OverlayScene`]) |
//! | [`playback`] | Polling timeline over the analysed window ([`PlaybackTimeline`]) |
//! | [`config`] | Drawing options ([`OverlayConfig`]) |
//! | [`error`] | Error types ([`OverlayError`], [`Result`]) |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `annotate` | PNG rendering of overlays (default) |

// Modules
#[cfg(feature = "annotate")]
pub mod annotate;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod payload;
pub mod playback;
pub mod scene;
pub mod series;
pub mod utils;
pub mod viewport;
pub mod visualizer;

// Re-export main types for convenience
pub use config::OverlayConfig;
pub use engine::{Bone, Landmark, OverlayEngine};
pub use error::{OverlayError, Result};
pub use payload::{AnalyzeResponse, OverlayPayload};
pub use playback::PlaybackTimeline;
pub use scene::OverlayScene;
pub use series::{Connection, CoordinateSpace, OverlayFrame, OverlaySeries, Point};
pub use viewport::{DisplayRect, FrameGeometry, Rotation, Size};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
