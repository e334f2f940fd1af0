// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Integration tests for the overlay library

use swing_overlay::{
    AnalyzeResponse, DisplayRect, FrameGeometry, OverlayEngine, OverlayScene, PlaybackTimeline,
    Rotation, Size,
};

const EPS: f32 = 1e-3;

const RESPONSE: &str = r#"{
    "sessionId": "it-session",
    "metrics": { "x_factor_deg": 38.0 },
    "overlay": {
        "version": "1",
        "fps": 10.0,
        "coord_space": "video_px",
        "landmark_ids": [11, 12, 13],
        "connections": [[0, 1], [1, 2], [1, 0], [2, 2], [0, 7]],
        "window_start_ms": 0,
        "window_end_ms": 200,
        "min_vis": 0.5,
        "frames": [
            { "t_ms": 100, "xyv": [[15.0, 25.0, 0.9], [40.0, 50.0, 0.1], null] },
            { "t_ms": 0, "xyv": [[10.0, 20.0, 0.9], [30.0, 40.0, 0.8], [50.0, 60.0]] },
            { "t_ms": 200, "xyv": [[12.0, 22.0, 0.9], [32.0, 42.0, 0.9], [52.0, 62.0, 0.9]] }
        ]
    }
}"#;

fn engine() -> OverlayEngine {
    let response = AnalyzeResponse::from_json(RESPONSE).unwrap();
    OverlayEngine::new(response.overlay_series().unwrap())
}

#[test]
fn test_series_from_response() {
    let engine = engine();
    let series = engine.series();
    assert_eq!(series.len(), 3);
    assert_eq!(series.landmark_ids, vec![11, 12, 13]);
    assert_eq!(series.window_ms, Some((0, 200)));
    assert_eq!(series.time_span_ms(), Some((0, 200)));
    // [1, 0] duplicates [0, 1], [2, 2] is degenerate; [0, 7] survives until lookup
    assert_eq!(series.connections().len(), 3);
    let timestamps: Vec<u64> = series.frames().iter().map(|f| f.timestamp_ms).collect();
    assert_eq!(timestamps, vec![0, 100, 200]);
}

#[test]
fn test_frame_lookup_between_frames() {
    let engine = engine();
    let frame = engine.frame_at(150).unwrap();
    assert_eq!(frame.timestamp_ms, 100);

    let landmarks = engine.landmarks_for_frame(frame);
    assert_eq!(landmarks.len(), 1);
    assert_eq!(landmarks[0].index, 0);
    assert!((landmarks[0].x - 15.0).abs() < EPS);
    assert!(engine.bones_for_frame(frame).is_empty());
}

#[test]
fn test_frame_lookup_bounds() {
    let engine = engine();
    assert_eq!(engine.frame_at(0).unwrap().timestamp_ms, 0);
    assert_eq!(engine.frame_at(99).unwrap().timestamp_ms, 0);
    assert_eq!(engine.frame_at(100).unwrap().timestamp_ms, 100);
    assert_eq!(engine.frame_at(10_000).unwrap().timestamp_ms, 200);
}

#[test]
fn test_frame_lookup_is_monotonic() {
    let engine = engine();
    let mut last = 0;
    for position in (0..400).step_by(7) {
        let t = engine.frame_at(position).unwrap().timestamp_ms;
        assert!(t >= last);
        last = t;
    }
}

#[test]
fn test_bones_reference_drawable_landmarks() {
    let engine = engine();
    let frame = engine.frame_at(0).unwrap();
    let bones = engine.bones_for_frame(frame);
    // [0, 7] has no landmark 7
    assert_eq!(bones.len(), 2);
    assert!((bones[0].ax - 10.0).abs() < EPS);
    assert!((bones[1].by - 60.0).abs() < EPS);
}

#[test]
fn test_visibility_threshold_extremes() {
    let response = AnalyzeResponse::from_json(RESPONSE).unwrap();
    let series = response.overlay_series().unwrap();

    let all = OverlayEngine::new(series.clone()).with_min_visibility(0.0);
    let frame = all.frame_at(200).unwrap();
    assert_eq!(all.landmarks_for_frame(frame).len(), 3);

    let none = OverlayEngine::new(series).with_min_visibility(1.01);
    let frame = none.frame_at(200).unwrap();
    assert!(none.landmarks_for_frame(frame).is_empty());
    assert!(none.bones_for_frame(frame).is_empty());
}

#[test]
fn test_letterbox_rect() {
    let rect = DisplayRect::compute(1000.0, 1000.0, 1920.0, 1080.0);
    assert!(rect.left.abs() < EPS);
    assert!((rect.top - 218.75).abs() < EPS);
    assert!((rect.width - 1000.0).abs() < EPS);
    assert!((rect.height - 562.5).abs() < EPS);

    let (x, y) = rect.map_frame_to_view(0.0, 0.0, 1920.0, 1080.0);
    assert!((x - rect.left).abs() < EPS && (y - rect.top).abs() < EPS);
    let (x, y) = rect.map_frame_to_view(1920.0, 1080.0, 1920.0, 1080.0);
    assert!((x - rect.right()).abs() < EPS && (y - rect.bottom()).abs() < EPS);
}

#[test]
fn test_degenerate_rect_is_full_viewport() {
    let rect = DisplayRect::compute(800.0, 600.0, 0.0, 1080.0);
    assert_eq!(rect, DisplayRect::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn test_scene_composition() {
    let engine = engine();
    let geometry = FrameGeometry::new(Size::new(1920.0, 1080.0), Rotation::None);
    let scene = OverlayScene::compose(&engine, 150, Size::new(1000.0, 1000.0), geometry);

    assert_eq!(scene.frame_timestamp_ms, Some(100));
    assert_eq!(scene.joints.len(), 1);
    let scale = 1000.0 / 1920.0;
    assert!((scene.joints[0].x - 15.0 * scale).abs() < EPS);
    assert!((scene.joints[0].y - (218.75 + 25.0 * scale)).abs() < EPS);
}

#[test]
fn test_scene_unknown_frame_size_is_empty() {
    let engine = engine();
    let geometry = FrameGeometry::new(Size::new(0.0, 0.0), Rotation::None);
    let scene = OverlayScene::compose(&engine, 150, Size::new(1000.0, 1000.0), geometry);
    assert!(scene.is_empty());
    assert!(scene.frame_timestamp_ms.is_none());
}

#[test]
fn test_decoded_space_is_rotated_once() {
    let json = RESPONSE.replace("video_px", "raw_decoded_px");
    let response = AnalyzeResponse::from_json(&json).unwrap();
    let engine = OverlayEngine::new(response.overlay_series().unwrap());

    let geometry = FrameGeometry::new(Size::new(1920.0, 1080.0), Rotation::Cw90);
    let scene = OverlayScene::compose(&engine, 0, Size::new(1080.0, 1920.0), geometry);

    // (10, 20) in decoded pixels is (1080 - 20, 10) on the upright frame
    assert!((scene.joints[0].x - 1060.0).abs() < EPS);
    assert!((scene.joints[0].y - 10.0).abs() < EPS);
}

#[test]
fn test_playback_covers_window() {
    let engine = engine();
    let positions: Vec<u64> = PlaybackTimeline::for_series(engine.series(), Some(33)).collect();
    assert_eq!(positions.first(), Some(&0));
    assert_eq!(positions.last(), Some(&200));
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[cfg(feature = "annotate")]
#[test]
fn test_render_overlay_draws_pixels() {
    use swing_overlay::annotate::render_overlay;
    use swing_overlay::OverlayConfig;

    let engine = engine();
    let geometry = FrameGeometry::new(Size::new(192.0, 108.0), Rotation::None);
    let (image, scene) = render_overlay(
        &engine,
        0,
        Size::new(192.0, 108.0),
        geometry,
        None,
        &OverlayConfig::new(),
    );
    assert_eq!(image.dimensions(), (192, 108));
    assert!(!scene.is_empty());
    assert!(image.pixels().any(|p| p.0 != [0, 0, 0]));
}
