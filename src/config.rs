// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Overlay configuration.
//!
//! This module defines the [`OverlayConfig`] struct, which controls how a host
//! render loop samples playback and how the skeleton is drawn: stroke sizes,
//! colors, which layers are shown, and an optional visibility threshold override.

use crate::error::{OverlayError, Result};
use crate::visualizer::Color;

/// Default polling cadence of the playback position, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 33;

/// Largest accepted bone width, joint radius or joint stroke, in pixels.
pub const MAX_STROKE_PX: f32 = 256.0;

/// Configuration for drawing pose overlays.
///
/// It uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use swing_overlay::OverlayConfig;
/// use swing_overlay::visualizer::Color;
///
/// let config = OverlayConfig::new()
///     .with_bone_width(3.0)
///     .with_joint_radius(5.0)
///     .with_bone_color(Color::GREEN)
///     .with_min_visibility(0.3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Line width of bones, in viewport pixels.
    pub bone_width: f32,
    /// Radius of joint circles, in viewport pixels.
    pub joint_radius: f32,
    /// Stroke width of joint circles, in viewport pixels.
    pub joint_stroke: f32,
    pub bone_color: Color,
    pub joint_color: Color,
    /// Color each bone from the limb palette instead of `bone_color`.
    pub color_limbs: bool,
    pub show_bones: bool,
    pub show_joints: bool,
    /// Interval between playback position samples.
    pub poll_interval_ms: u64,
    /// Visibility threshold override. If `None`, the series' own threshold is used.
    pub min_visibility: Option<f32>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            bone_width: 4.0,
            joint_radius: 6.0,
            joint_stroke: 2.0,
            bone_color: Color::WHITE,
            joint_color: Color::WHITE,
            color_limbs: false,
            show_bones: true,
            show_joints: true,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            min_visibility: None,
        }
    }
}

impl OverlayConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_bone_width(mut self, width: f32) -> Self {
        self.bone_width = width;
        self
    }

    #[must_use]
    pub const fn with_joint_radius(mut self, radius: f32) -> Self {
        self.joint_radius = radius;
        self
    }

    #[must_use]
    pub const fn with_joint_stroke(mut self, stroke: f32) -> Self {
        self.joint_stroke = stroke;
        self
    }

    #[must_use]
    pub const fn with_bone_color(mut self, color: Color) -> Self {
        self.bone_color = color;
        self
    }

    #[must_use]
    pub const fn with_joint_color(mut self, color: Color) -> Self {
        self.joint_color = color;
        self
    }

    /// Color bones per connection from [`LIMB_COLORS`](crate::visualizer::color::LIMB_COLORS).
    #[must_use]
    pub const fn with_limb_colors(mut self, enabled: bool) -> Self {
        self.color_limbs = enabled;
        self
    }

    /// Color used for the bone built from the connection at `connection`.
    #[must_use]
    pub const fn bone_color_for(&self, connection: usize) -> Color {
        if self.color_limbs {
            Color::from_limb_index(connection)
        } else {
            self.bone_color
        }
    }

    /// Show or hide bones.
    #[must_use]
    pub const fn with_bones(mut self, show: bool) -> Self {
        self.show_bones = show;
        self
    }

    /// Show or hide joints.
    #[must_use]
    pub const fn with_joints(mut self, show: bool) -> Self {
        self.show_joints = show;
        self
    }

    /// Set the playback polling interval.
    ///
    /// # Arguments
    ///
    /// * `interval_ms` - Milliseconds between position samples.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval_ms: u64) -> Self {
        self.poll_interval_ms = interval_ms;
        self
    }

    /// Override the series' visibility threshold.
    ///
    /// The value is not clamped: `0.0` shows every present landmark and anything
    /// above `1.0` hides all of them.
    #[must_use]
    pub const fn with_min_visibility(mut self, threshold: f32) -> Self {
        self.min_visibility = Some(threshold);
        self
    }

    /// Check that sizes and the polling interval are usable for drawing.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::ConfigError`] for negative, non-finite or oversized
    /// (above [`MAX_STROKE_PX`]) sizes and for a zero polling interval.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("bone_width", self.bone_width),
            ("joint_radius", self.joint_radius),
            ("joint_stroke", self.joint_stroke),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(OverlayError::ConfigError(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
            if value > MAX_STROKE_PX {
                return Err(OverlayError::ConfigError(format!(
                    "{name} must be at most {MAX_STROKE_PX} px, got {value}"
                )));
            }
        }
        if self.poll_interval_ms == 0 {
            return Err(OverlayError::ConfigError(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
