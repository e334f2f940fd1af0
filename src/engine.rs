// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Overlay engine: temporal lookup and skeleton derivation.
//!
//! [`OverlayEngine`] answers two questions for a host render loop: which landmark
//! frame belongs to the current playback position, and which landmarks and bones
//! of that frame are visible enough to draw. It holds no mutable state, so one
//! engine can be queried from any number of threads.

use std::sync::Arc;

use crate::config::OverlayConfig;
use crate::series::{OverlayFrame, OverlaySeries};

/// A visible landmark in frame pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    /// Landmark id (position in the frame's point list).
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub visibility: f32,
}

/// A drawable skeleton segment in frame pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bone {
    /// Position of the source connection in the series' connection list.
    pub connection: usize,
    pub ax: f32,
    pub ay: f32,
    pub bx: f32,
    pub by: f32,
}

/// Stateless query object over one [`OverlaySeries`].
///
/// # Example
///
/// ```rust
/// use swing_overlay::{OverlayEngine, OverlaySeries};
/// use swing_overlay::series::{Connection, CoordinateSpace, OverlayFrame, Point};
///
/// let point = |x, y, visibility| Some(Point { x, y, visibility });
/// let series = OverlaySeries::new(
///     CoordinateSpace::from_tag("video_px"),
///     0.5,
///     vec![Connection::new(0, 1).unwrap()],
///     vec![
///         OverlayFrame::new(0, vec![point(10.0, 20.0, 1.0)]),
///         OverlayFrame::new(100, vec![point(15.0, 25.0, 1.0), point(5.0, 5.0, 0.2)]),
///     ],
/// );
/// let engine = OverlayEngine::new(series);
///
/// let frame = engine.frame_at(150).unwrap();
/// assert_eq!(frame.timestamp_ms, 100);
/// assert_eq!(engine.landmarks_for_frame(frame).len(), 1);
/// assert!(engine.bones_for_frame(frame).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct OverlayEngine {
    series: Arc<OverlaySeries>,
    min_visibility: f32,
}

impl OverlayEngine {
    /// Create an engine using the series' own visibility threshold.
    #[must_use]
    pub fn new(series: impl Into<Arc<OverlaySeries>>) -> Self {
        let series = series.into();
        let min_visibility = series.min_visibility;
        Self {
            series,
            min_visibility,
        }
    }

    /// Override the visibility threshold for this engine.
    ///
    /// Any value is accepted: `0` disables filtering, anything above `1` hides
    /// every landmark.
    #[must_use]
    pub fn with_min_visibility(mut self, min_visibility: f32) -> Self {
        self.min_visibility = min_visibility;
        self
    }

    /// Apply the threshold override from a drawing configuration, if it has one.
    #[must_use]
    pub fn with_config(self, config: &OverlayConfig) -> Self {
        match config.min_visibility {
            Some(threshold) => self.with_min_visibility(threshold),
            None => self,
        }
    }

    #[must_use]
    pub fn series(&self) -> &OverlaySeries {
        &self.series
    }

    /// Visibility threshold in effect for landmark queries.
    #[must_use]
    pub const fn min_visibility(&self) -> f32 {
        self.min_visibility
    }

    /// Index of the frame to show at `position_ms`.
    ///
    /// This is the last frame whose timestamp is `<= position_ms`, so the most
    /// recent pose is held until the next one starts. Positions before the first
    /// frame fall back to frame `0` so the overlay does not vanish at the start of
    /// playback. Returns `None` only for an empty series.
    #[must_use]
    pub fn frame_index_at(&self, position_ms: u64) -> Option<usize> {
        let frames = self.series.frames();
        if frames.is_empty() {
            return None;
        }
        // Frames are sorted, so the predicate is true for a prefix
        let after = frames.partition_point(|f| f.timestamp_ms <= position_ms);
        Some(after.saturating_sub(1))
    }

    /// Frame to show at `position_ms`; see [`frame_index_at`](Self::frame_index_at).
    #[must_use]
    pub fn frame_at(&self, position_ms: u64) -> Option<&OverlayFrame> {
        self.frame_index_at(position_ms)
            .map(|i| &self.series.frames()[i])
    }

    /// Landmarks of `frame` that pass the visibility threshold.
    ///
    /// Coordinates are returned unchanged in the series' coordinate space, in
    /// ascending index order. Missing points and points below the threshold leave
    /// gaps in the indices.
    #[must_use]
    pub fn landmarks_for_frame(&self, frame: &OverlayFrame) -> Vec<Landmark> {
        frame
            .points
            .iter()
            .enumerate()
            .filter_map(|(index, point)| {
                let p = point.as_ref()?;
                (p.visibility >= self.min_visibility).then_some(Landmark {
                    index,
                    x: p.x,
                    y: p.y,
                    visibility: p.visibility,
                })
            })
            .collect()
    }

    /// Bones of `frame` whose endpoints both pass the visibility threshold.
    ///
    /// Output follows the order of the series' connections. A limb may appear
    /// and disappear between frames as its endpoints cross the threshold.
    #[must_use]
    pub fn bones_for_frame(&self, frame: &OverlayFrame) -> Vec<Bone> {
        let landmarks = self.landmarks_for_frame(frame);
        let mut by_index: Vec<Option<&Landmark>> = vec![None; frame.points.len()];
        for lm in &landmarks {
            by_index[lm.index] = Some(lm);
        }
        let lookup = |i: usize| by_index.get(i).copied().flatten();

        self.series
            .connections()
            .iter()
            .enumerate()
            .filter_map(|(connection, c)| {
                let a = lookup(c.a)?;
                let b = lookup(c.b)?;
                Some(Bone {
                    connection,
                    ax: a.x,
                    ay: a.y,
                    bx: b.x,
                    by: b.y,
                })
            })
            .collect()
    }
}
