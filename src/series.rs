// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Engine-ready overlay data model.
//!
//! [`OverlaySeries`] is built once per analysis result from an [`OverlayPayload`]
//! and never mutated afterwards. Malformed points and connections are dropped here,
//! so the engine only ever sees present or absent landmarks.

use std::collections::HashSet;
use std::fmt;

use crate::payload::OverlayPayload;
use crate::viewport::Size;
use crate::{verbose, warn};

/// How landmark coordinates relate to the displayed video frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoordinateConvention {
    /// Pixels in display orientation (after rotation correction).
    #[default]
    Display,
    /// Pixels in the decoder's raw orientation (before rotation correction).
    Decoded,
    /// Display-oriented coordinates normalized to `[0, 1]`.
    Normalized,
}

impl CoordinateConvention {
    /// Returns the canonical name of the convention.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Decoded => "decoded",
            Self::Normalized => "normalized",
        }
    }
}

impl fmt::Display for CoordinateConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coordinate space tag declared by the backend.
///
/// The tag is kept verbatim; the convention derived from it decides whether
/// landmarks need rotating or scaling before they are mapped into the viewport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoordinateSpace {
    tag: String,
    convention: CoordinateConvention,
}

impl CoordinateSpace {
    /// Classify a backend tag.
    ///
    /// The tag is split into `_`/`-` separated words. A `raw` or `decoded` word
    /// marks decoder-oriented pixels, a `norm` or `normalized` word marks
    /// normalized coordinates, everything else (`video_px`, `px`, ...) is
    /// display-oriented pixels.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let lower = tag.to_lowercase();
        let has_word =
            |words: &[&str]| lower.split(['_', '-']).any(|word| words.contains(&word));
        let convention = if has_word(&["raw", "decoded", "decoder"]) {
            CoordinateConvention::Decoded
        } else if has_word(&["norm", "normalized", "normalised"]) {
            CoordinateConvention::Normalized
        } else {
            CoordinateConvention::Display
        };
        Self {
            tag: tag.to_string(),
            convention,
        }
    }

    /// The tag exactly as the backend sent it.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub const fn convention(&self) -> CoordinateConvention {
        self.convention
    }
}

impl fmt::Display for CoordinateSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.tag, self.convention)
    }
}

/// A landmark position with its visibility score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub visibility: f32,
}

impl Point {
    /// Build a point from a wire tuple `[x, y, visibility?]`.
    ///
    /// Returns `None` for tuples with fewer than two components. A missing
    /// visibility means the point is fully visible.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_components(components: &[f64]) -> Option<Self> {
        match components {
            [x, y] => Some(Self {
                x: *x as f32,
                y: *y as f32,
                visibility: 1.0,
            }),
            [x, y, visibility, ..] => Some(Self {
                x: *x as f32,
                y: *y as f32,
                visibility: *visibility as f32,
            }),
            _ => None,
        }
    }
}

/// One landmark frame at a position on the video timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    /// Position on the video timeline in milliseconds.
    pub timestamp_ms: u64,
    /// Landmarks by index; `None` where the point is missing or malformed.
    pub points: Vec<Option<Point>>,
}

impl OverlayFrame {
    #[must_use]
    pub const fn new(timestamp_ms: u64, points: Vec<Option<Point>>) -> Self {
        Self {
            timestamp_ms,
            points,
        }
    }

    /// Number of present points, regardless of visibility.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.points.iter().flatten().count()
    }
}

/// An unordered pair of landmark indices drawn as a bone.
///
/// Endpoint order is kept as given so bones are drawn from `a` to `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
}

impl Connection {
    /// Create a connection, rejecting self-loops.
    #[must_use]
    pub const fn new(a: usize, b: usize) -> Option<Self> {
        if a == b { None } else { Some(Self { a, b }) }
    }

    /// Build a connection from a wire index list, using its first two entries.
    ///
    /// Lists with fewer than two entries, negative indices or identical
    /// indices yield `None`.
    #[must_use]
    pub fn from_indices(indices: &[i64]) -> Option<Self> {
        let [a, b, ..] = indices else {
            return None;
        };
        let a = usize::try_from(*a).ok()?;
        let b = usize::try_from(*b).ok()?;
        Self::new(a, b)
    }

    /// Orientation-independent key, used to deduplicate `(a, b)` and `(b, a)`.
    #[must_use]
    pub fn key(&self) -> (usize, usize) {
        (self.a.min(self.b), self.a.max(self.b))
    }

    /// Whether the connection touches the given landmark.
    #[must_use]
    pub const fn touches(&self, index: usize) -> bool {
        self.a == index || self.b == index
    }
}

/// Immutable, engine-ready pose overlay for one analysis result.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySeries {
    /// Overlay format version.
    pub version: String,
    /// Landmark sampling rate reported by the backend.
    pub fps: f64,
    /// Pixel space of the landmark coordinates.
    pub coordinate_space: CoordinateSpace,
    /// Visibility threshold, copied verbatim from the payload.
    pub min_visibility: f32,
    /// Landmark ids produced by the pose model.
    pub landmark_ids: Vec<i64>,
    /// Analysed window `(start_ms, end_ms)` on the video timeline.
    pub window_ms: Option<(u64, u64)>,
    connections: Vec<Connection>,
    frames: Vec<OverlayFrame>,
    frame_size: Option<Size>,
}

impl OverlaySeries {
    /// Build a series from already typed parts.
    ///
    /// Frames are stably sorted by timestamp if needed, so equal timestamps keep
    /// their relative order and the last one wins during lookup.
    #[must_use]
    pub fn new(
        coordinate_space: CoordinateSpace,
        min_visibility: f32,
        connections: Vec<Connection>,
        mut frames: Vec<OverlayFrame>,
    ) -> Self {
        if !frames.windows(2).all(|w| w[0].timestamp_ms <= w[1].timestamp_ms) {
            warn!(
                "Overlay frames are not sorted by timestamp ({} frames). Sorting before lookup.",
                frames.len()
            );
            frames.sort_by_key(|f| f.timestamp_ms);
        }

        Self {
            version: String::new(),
            fps: 0.0,
            coordinate_space,
            min_visibility,
            landmark_ids: Vec::new(),
            window_ms: None,
            connections,
            frames,
            frame_size: None,
        }
    }

    /// Adapt the backend overlay payload.
    ///
    /// Malformed connections are discarded individually; frame dimensions start
    /// unset until the caller observes the video size.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_payload(payload: OverlayPayload) -> Self {
        let mut seen = HashSet::new();
        let mut connections = Vec::with_capacity(payload.connections.len());
        let mut dropped = 0usize;
        for indices in &payload.connections {
            match Connection::from_indices(indices) {
                Some(c) if seen.insert(c.key()) => connections.push(c),
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            verbose!("Dropped {dropped} malformed or duplicate overlay connection(s)");
        }

        let frames = payload
            .frames
            .iter()
            .map(|f| {
                let points = f
                    .xyv
                    .iter()
                    .map(|p| p.as_deref().and_then(Point::from_components))
                    .collect();
                OverlayFrame::new(f.t_ms, points)
            })
            .collect();

        let mut series = Self::new(
            CoordinateSpace::from_tag(&payload.coord_space),
            payload.min_vis as f32,
            connections,
            frames,
        );
        series.version = payload.version;
        series.fps = payload.fps;
        series.landmark_ids = payload.landmark_ids;
        series.window_ms = Some((payload.window_start_ms, payload.window_end_ms));
        series
    }

    /// Attach the display-oriented frame size once the video size is known.
    #[must_use]
    pub fn with_frame_size(mut self, frame_size: Size) -> Self {
        self.frame_size = Some(frame_size);
        self
    }

    /// Display-oriented frame size, if it has been observed.
    #[must_use]
    pub const fn frame_size(&self) -> Option<Size> {
        self.frame_size
    }

    #[must_use]
    pub fn frames(&self) -> &[OverlayFrame] {
        &self.frames
    }

    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Timestamps of the first and last frames.
    #[must_use]
    pub fn time_span_ms(&self) -> Option<(u64, u64)> {
        Some((
            self.frames.first()?.timestamp_ms,
            self.frames.last()?.timestamp_ms,
        ))
    }
}

impl From<OverlayPayload> for OverlaySeries {
    fn from(payload: OverlayPayload) -> Self {
        Self::from_payload(payload)
    }
}
