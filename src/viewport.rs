// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Viewport mapping for letterboxed video frames.
//!
//! The video surface draws each frame "fit-inside": scaled to the largest size that
//! fits the viewport while preserving aspect ratio, centered. [`DisplayRect`]
//! reproduces that placement so overlay points land on the same pixels as the video.

use std::fmt;
use std::str::FromStr;

use crate::error::{OverlayError, Result};

/// Width and height in pixel or device-independent units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Dimensions with width and height exchanged.
    #[must_use]
    pub const fn transposed(&self) -> Self {
        Self::new(self.height, self.width)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `1920x1080`.
impl FromStr for Size {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || OverlayError::GeometryError(format!("invalid size '{s}', expected WxH"));
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let width = w.trim().parse::<f32>().map_err(|_| invalid())?;
        let height = h.trim().parse::<f32>().map_err(|_| invalid())?;
        Ok(Self::new(width, height))
    }
}

/// Clockwise rotation the player applies to decoded frames before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// Build a rotation from degrees, accepting any multiple of 90 (negative or > 360).
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::GeometryError`] if `degrees` is not a multiple of 90.
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        match degrees.rem_euclid(360) {
            0 => Ok(Self::None),
            90 => Ok(Self::Cw90),
            180 => Ok(Self::Cw180),
            270 => Ok(Self::Cw270),
            _ => Err(OverlayError::GeometryError(format!(
                "unsupported rotation {degrees}°, expected a multiple of 90"
            ))),
        }
    }

    #[must_use]
    pub const fn degrees(&self) -> i32 {
        match self {
            Self::None => 0,
            Self::Cw90 => 90,
            Self::Cw180 => 180,
            Self::Cw270 => 270,
        }
    }

    /// Whether display width and height are swapped relative to the decoder.
    #[must_use]
    pub const fn swaps_axes(&self) -> bool {
        matches!(self, Self::Cw90 | Self::Cw270)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

impl FromStr for Rotation {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self> {
        let degrees = s.trim().trim_end_matches('°').parse::<i32>().map_err(|_| {
            OverlayError::GeometryError(format!("invalid rotation '{s}', expected degrees"))
        })?;
        Self::from_degrees(degrees)
    }
}

/// Decoded video frame size together with the rotation applied for display.
///
/// Keeping both values in one place makes the rotation-corrected frame size an
/// explicit parameter instead of something each caller has to re-derive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameGeometry {
    /// Size as reported by the decoder, before rotation.
    pub decoded: Size,
    pub rotation: Rotation,
}

impl FrameGeometry {
    #[must_use]
    pub const fn new(decoded: Size, rotation: Rotation) -> Self {
        Self { decoded, rotation }
    }

    /// Frame size in display orientation.
    #[must_use]
    pub const fn display_size(&self) -> Size {
        if self.rotation.swaps_axes() {
            self.decoded.transposed()
        } else {
            self.decoded
        }
    }

    /// Rotate a point from decoded orientation into display orientation.
    #[must_use]
    pub fn to_display_point(&self, x: f32, y: f32) -> (f32, f32) {
        let Size { width, height } = self.decoded;
        match self.rotation {
            Rotation::None => (x, y),
            Rotation::Cw90 => (height - y, x),
            Rotation::Cw180 => (width - x, height - y),
            Rotation::Cw270 => (y, width - x),
        }
    }
}

/// Sub-rectangle of the viewport where the video image is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Compute the fit-inside, centered rectangle of a frame within a viewport.
    ///
    /// If any dimension is not strictly positive, the full viewport
    /// `(0, 0, viewport_w, viewport_h)` is returned and no letterboxing is applied.
    /// A frame relatively wider than the viewport spans the full width; otherwise,
    /// including equal aspect ratios, it spans the full height.
    #[must_use]
    pub fn compute(viewport_w: f32, viewport_h: f32, frame_w: f32, frame_h: f32) -> Self {
        let positive = |v: f32| v > 0.0;
        if !(positive(viewport_w) && positive(viewport_h) && positive(frame_w) && positive(frame_h))
        {
            return Self::new(0.0, 0.0, viewport_w, viewport_h);
        }

        let view_aspect = viewport_w / viewport_h;
        let frame_aspect = frame_w / frame_h;

        if frame_aspect > view_aspect {
            let scaled_h = viewport_w / frame_aspect;
            Self::new(0.0, (viewport_h - scaled_h) / 2.0, viewport_w, scaled_h)
        } else {
            let scaled_w = viewport_h * frame_aspect;
            Self::new((viewport_w - scaled_w) / 2.0, 0.0, scaled_w, viewport_h)
        }
    }

    /// [`compute`](Self::compute) for sizes.
    #[must_use]
    pub fn fit(viewport: Size, frame: Size) -> Self {
        Self::compute(viewport.width, viewport.height, frame.width, frame.height)
    }

    /// Map a point from frame pixel space into viewport space.
    ///
    /// Points outside the frame map outside the rectangle; nothing is clamped.
    #[must_use]
    pub fn map_frame_to_view(&self, fx: f32, fy: f32, frame_w: f32, frame_h: f32) -> (f32, f32) {
        let vx = self.left + (fx / frame_w) * self.width;
        let vy = self.top + (fy / frame_h) * self.height;
        (vx, vy)
    }

    /// Inverse of [`map_frame_to_view`](Self::map_frame_to_view), e.g. for hit-testing taps.
    #[must_use]
    pub fn map_view_to_frame(&self, vx: f32, vy: f32, frame_w: f32, frame_h: f32) -> (f32, f32) {
        let fx = (vx - self.left) / self.width * frame_w;
        let fy = (vy - self.top) / self.height * frame_h;
        (fx, fy)
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Whether a viewport point lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, vx: f32, vy: f32) -> bool {
        vx >= self.left && vx <= self.right() && vy >= self.top && vy <= self.bottom()
    }
}

impl fmt::Display for DisplayRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.1}, {:.1}, {:.1}x{:.1}]",
            self.left, self.top, self.width, self.height
        )
    }
}
