// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Playback position sampling.
//!
//! A host render loop polls the player at a fixed cadence rather than once per
//! landmark frame. [`PlaybackTimeline`] produces the same sequence of positions
//! so renders and tests can replay a session deterministically.

use crate::config::DEFAULT_POLL_INTERVAL_MS;
use crate::series::OverlaySeries;

/// Evenly spaced playback positions over `[start_ms, end_ms]`.
///
/// The end position is always yielded last, even when it is not a multiple of
/// the step, so the final pose is never skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackTimeline {
    start_ms: u64,
    end_ms: u64,
    step_ms: u64,
    next: Option<u64>,
}

impl PlaybackTimeline {
    /// Create a timeline. A zero step is treated as 1 ms.
    #[must_use]
    pub fn new(start_ms: u64, end_ms: u64, step_ms: u64) -> Self {
        Self {
            start_ms,
            end_ms,
            step_ms: step_ms.max(1),
            next: (start_ms <= end_ms).then_some(start_ms),
        }
    }

    /// Timeline covering a series at the default polling cadence.
    ///
    /// Uses the analysed window when the backend reported one, otherwise the
    /// span from the first to the last frame. Empty series yield a single
    /// position at `0`.
    #[must_use]
    pub fn for_series(series: &OverlaySeries, step_ms: Option<u64>) -> Self {
        let (start, end) = series
            .window_ms
            .filter(|(start, end)| start <= end)
            .or_else(|| series.time_span_ms())
            .unwrap_or((0, 0));
        Self::new(start, end, step_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS))
    }

    #[must_use]
    pub const fn start_ms(&self) -> u64 {
        self.start_ms
    }

    #[must_use]
    pub const fn end_ms(&self) -> u64 {
        self.end_ms
    }

    #[must_use]
    pub const fn step_ms(&self) -> u64 {
        self.step_ms
    }
}

impl Iterator for PlaybackTimeline {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current >= self.end_ms {
            None
        } else {
            Some(current.saturating_add(self.step_ms).min(self.end_ms))
        };
        Some(current)
    }
}
