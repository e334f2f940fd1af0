// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Visualization helpers for pose overlays.

/// Color definitions and palettes.
pub mod color;

pub use color::Color;
