// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use crate::cli::args::InspectArgs;
use crate::cli::load_engine;
use crate::error::Result;
use crate::utils::{format_timestamp, pluralize};
use crate::{info, section, warn, OverlayEngine};

/// Per-series landmark statistics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LandmarkStats {
    /// Frames with at least one drawable landmark.
    pub frames_with_pose: usize,
    /// Mean number of drawable landmarks per frame.
    pub mean_landmarks: f32,
    /// Mean number of drawable bones per frame.
    pub mean_bones: f32,
}

impl LandmarkStats {
    /// Collect statistics over every frame of the engine's series.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn collect(engine: &OverlayEngine) -> Self {
        let frames = engine.series().frames();
        if frames.is_empty() {
            return Self::default();
        }

        let (mut with_pose, mut landmarks, mut bones) = (0, 0, 0);
        for frame in frames {
            let count = engine.landmarks_for_frame(frame).len();
            if count > 0 {
                with_pose += 1;
            }
            landmarks += count;
            bones += engine.bones_for_frame(frame).len();
        }

        let n = frames.len() as f32;
        Self {
            frames_with_pose: with_pose,
            mean_landmarks: landmarks as f32 / n,
            mean_bones: bones as f32 / n,
        }
    }
}

/// Print a summary of an analysis response.
///
/// # Errors
///
/// Returns an error if the payload cannot be read or has no overlay section.
pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let (response, engine) = load_engine(&args.payload, None)?;
    let series = engine.series();

    section!("Session {}", response.session_id);
    let mut metrics: Vec<_> = response.metrics.iter().collect();
    metrics.sort_by(|a, b| a.0.cmp(b.0));
    for (name, value) in metrics {
        info!("  {name}: {value:.2}");
    }

    if let Some(quality) = &response.quality {
        info!(
            "  quality: {} ({:.2}, {:.0} frames used)",
            quality.level, quality.score, quality.frames_used
        );
        for w in &quality.warnings {
            warn!("{w}");
        }
    }

    if let Some(feedback) = &response.feedback {
        section!("Feedback");
        if let Some(headline) = &feedback.headline {
            info!("  {headline}");
        }
        for point in &feedback.focus_points {
            info!(
                "  • {}: {} → {} ({})",
                point.title,
                point.current_issue,
                point.target,
                point.feel_cue
            );
        }
        for drill in &feedback.drills {
            info!("  drill: {} - {}", drill.title, drill.description);
        }
    }

    section!("Overlay v{}", series.version);
    info!("  coordinate space: {}", series.coordinate_space);
    info!(
        "  {} at {:.1} fps, {}",
        pluralize(series.len(), "frame"),
        series.fps,
        pluralize(series.connections().len(), "connection")
    );
    if let Some((start, end)) = series.window_ms {
        info!(
            "  window: {} - {}",
            format_timestamp(start),
            format_timestamp(end)
        );
    }
    if let Some((first, last)) = series.time_span_ms() {
        info!(
            "  frames: {} - {}",
            format_timestamp(first),
            format_timestamp(last)
        );
    }

    let stats = LandmarkStats::collect(&engine);
    info!(
        "  min visibility {:.2}: {} with a pose, {:.1} landmarks and {:.1} bones per frame",
        engine.min_visibility(),
        pluralize(stats.frames_with_pose, "frame"),
        stats.mean_landmarks,
        stats.mean_bones
    );
    if series.len() > 0 && stats.frames_with_pose == 0 {
        warn!("No landmark passes the visibility threshold; the overlay will be empty.");
    }

    Ok(())
}
