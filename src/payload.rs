// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Wire types for the swing analysis response.
//!
//! The backend returns loosely typed JSON: optional sections, heterogeneous point
//! arity, nullable landmarks. These types mirror that shape exactly so it can be
//! deserialized once and then adapted into a strict [`OverlaySeries`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{OverlayError, Result};
use crate::series::OverlaySeries;

/// Full analysis response for one uploaded swing video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    /// Backend session identifier.
    pub session_id: String,
    /// Named swing metrics (e.g. racket speed, hip rotation).
    #[serde(default)]
    pub metrics: HashMap<String, f64>,
    /// Coaching feedback, if the analysis produced any.
    #[serde(default)]
    pub feedback: Option<Feedback>,
    /// Capture quality assessment.
    #[serde(default)]
    pub quality: Option<Quality>,
    /// Pose overlay data.
    #[serde(default)]
    pub overlay: Option<OverlayPayload>,
}

impl AnalyzeResponse {
    /// Parse a response from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Json`] if the JSON does not match the response shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a response from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            OverlayError::IoError(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Adapt the overlay section into an engine-ready series.
    ///
    /// Returns `None` when the response carries no overlay.
    #[must_use]
    pub fn overlay_series(&self) -> Option<OverlaySeries> {
        self.overlay.clone().map(OverlaySeries::from_payload)
    }
}

/// Coaching feedback block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// One-line summary.
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub focus_points: Vec<FocusPoint>,
    #[serde(default)]
    pub drills: Vec<Drill>,
    #[serde(default)]
    pub safety_notes: Option<String>,
}

/// A single technique correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusPoint {
    pub title: String,
    pub current_issue: String,
    pub target: String,
    pub feel_cue: String,
}

/// A suggested practice drill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drill {
    pub title: String,
    pub description: String,
}

/// Capture quality assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quality {
    /// Quality bucket reported by the backend (e.g. "good", "poor").
    pub level: String,
    pub score: f64,
    pub frames_used: f64,
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Backend-specific detail object, kept verbatim.
    #[serde(default)]
    pub details: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Pose overlay section of the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayPayload {
    /// Overlay format version.
    pub version: String,
    /// Sampling rate of the landmark frames.
    pub fps: f64,
    /// Pixel space the landmark coordinates are expressed in.
    pub coord_space: String,
    /// Landmark ids produced by the pose model, in point order.
    #[serde(default)]
    pub landmark_ids: Vec<i64>,
    /// Landmark index pairs forming the skeleton.
    #[serde(default)]
    pub connections: Vec<Vec<i64>>,
    /// Start of the analysed window on the video timeline.
    pub window_start_ms: u64,
    /// End of the analysed window on the video timeline.
    pub window_end_ms: u64,
    /// Minimum landmark visibility for drawing.
    pub min_vis: f64,
    #[serde(default)]
    pub frames: Vec<FramePayload>,
}

/// One timestamped landmark frame on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramePayload {
    /// Position on the video timeline in milliseconds.
    pub t_ms: u64,
    /// Per-landmark `[x, y]` or `[x, y, visibility]`, `None` when missing or malformed.
    #[serde(default, deserialize_with = "lenient_points")]
    pub xyv: Vec<Option<Vec<f64>>>,
}

/// Read a frame's point list, dropping malformed points one by one.
///
/// A point needs numeric `x` and `y`; a third component that is not a number
/// is ignored, leaving the visibility unset.
fn lenient_points<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<Option<Vec<f64>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    Ok(raw.iter().map(point_components).collect())
}

fn point_components(value: &Value) -> Option<Vec<f64>> {
    let items = value.as_array()?;
    let x = items.first()?.as_f64()?;
    let y = items.get(1)?.as_f64()?;
    let mut components = vec![x, y];
    if let Some(visibility) = items.get(2).and_then(Value::as_f64) {
        components.push(visibility);
    }
    Some(components)
}

impl OverlayPayload {
    /// Parse an overlay section on its own.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Json`] if the JSON does not match the overlay shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "sessionId": "abc-123",
        "metrics": { "hip_rotation_deg": 42.5 },
        "feedback": {
            "headline": "Turn your shoulders earlier",
            "focusPoints": [
                { "title": "Unit turn", "currentIssue": "Late", "target": "Early", "feelCue": "Show your back" }
            ],
            "drills": [ { "title": "Shadow swings", "description": "10 reps" } ]
        },
        "quality": { "level": "good", "score": 0.9, "framesUsed": 48, "details": { "blur": 0.1 } },
        "overlay": {
            "version": "1",
            "fps": 30.0,
            "coord_space": "video_px",
            "landmark_ids": [0, 1],
            "connections": [[0, 1]],
            "window_start_ms": 0,
            "window_end_ms": 100,
            "min_vis": 0.5,
            "frames": [
                { "t_ms": 0, "xyv": [[10.0, 20.0, 1.0]] },
                { "t_ms": 100, "xyv": [[15.0, 25.0, 1.0], null, [5.0]] }
            ],
            "extra_field": true
        },
        "unknownTopLevel": 1
    }"#;

    #[test]
    fn test_parse_full_response() {
        let response = AnalyzeResponse::from_json(RESPONSE).unwrap();
        assert_eq!(response.session_id, "abc-123");
        assert!((response.metrics["hip_rotation_deg"] - 42.5).abs() < 1e-9);

        let feedback = response.feedback.as_ref().unwrap();
        assert_eq!(feedback.focus_points.len(), 1);
        assert_eq!(feedback.focus_points[0].feel_cue, "Show your back");
        assert_eq!(feedback.drills[0].title, "Shadow swings");
        assert!(feedback.safety_notes.is_none());

        let quality = response.quality.as_ref().unwrap();
        assert!(quality.warnings.is_empty());
        assert!(quality.details.as_ref().unwrap().contains_key("blur"));

        let overlay = response.overlay.as_ref().unwrap();
        assert_eq!(overlay.frames.len(), 2);
        assert_eq!(overlay.frames[1].xyv[1], None);
        assert_eq!(overlay.frames[1].xyv[2], None);
    }

    #[test]
    fn test_minimal_response() {
        let response = AnalyzeResponse::from_json(r#"{ "sessionId": "s" }"#).unwrap();
        assert!(response.metrics.is_empty());
        assert!(response.overlay.is_none());
        assert!(response.overlay_series().is_none());
    }

    #[test]
    fn test_negative_timestamp_is_malformed() {
        let json = r#"{ "version": "1", "fps": 30, "coord_space": "px",
            "window_start_ms": 0, "window_end_ms": 0, "min_vis": 0.5,
            "frames": [ { "t_ms": -5, "xyv": [] } ] }"#;
        assert!(matches!(
            OverlayPayload::from_json(json),
            Err(OverlayError::Json(_))
        ));
    }

    #[test]
    fn test_malformed_points_are_dropped_individually() {
        let json = r#"{ "sessionId": "s", "metrics": { "tempo": 3.0 },
            "overlay": { "version": "1", "fps": 30, "coord_space": "px",
                "window_start_ms": 0, "window_end_ms": 0, "min_vis": 0.5,
                "frames": [ { "t_ms": 0,
                    "xyv": [[10, 20, 1.0], [1, "x"], [3, 4], "bad", [7]] } ] } }"#;
        let response = AnalyzeResponse::from_json(json).unwrap();
        assert!((response.metrics["tempo"] - 3.0).abs() < 1e-9);

        let xyv = &response.overlay.as_ref().unwrap().frames[0].xyv;
        assert_eq!(
            xyv,
            &vec![Some(vec![10.0, 20.0, 1.0]), None, Some(vec![3.0, 4.0]), None, None]
        );
    }

    #[test]
    fn test_non_numeric_visibility_is_ignored() {
        let json = r#"{ "version": "1", "fps": 30, "coord_space": "px",
            "window_start_ms": 0, "window_end_ms": 0, "min_vis": 0.5,
            "frames": [ { "t_ms": 0, "xyv": [[10, 20, null], [3, 4, "high"]] } ] }"#;
        let overlay = OverlayPayload::from_json(json).unwrap();
        assert_eq!(overlay.frames[0].xyv[0], Some(vec![10.0, 20.0]));

        let series = crate::series::OverlaySeries::from_payload(overlay);
        let points = &series.frames()[0].points;
        assert!(points.iter().all(|p| p.is_some_and(|p| (p.visibility - 1.0).abs() < 1e-6)));
    }

    #[test]
    fn test_missing_file() {
        let err = AnalyzeResponse::from_path("/nonexistent/response.json").unwrap_err();
        assert!(matches!(err, OverlayError::IoError(_)));
    }
}
