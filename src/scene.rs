// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! One overlay drawing pass: frame lookup, skeleton derivation and projection
//! into viewport coordinates.
//!
//! A host render loop calls [`OverlayScene::compose`] every time it samples the
//! playback position and hands the result to a drawing primitive.

use crate::engine::OverlayEngine;
use crate::series::CoordinateConvention;
use crate::viewport::{DisplayRect, FrameGeometry, Rotation, Size};

/// A joint position in viewport units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewJoint {
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub visibility: f32,
}

/// A bone segment in viewport units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBone {
    /// Position of the source connection in the series' connection list.
    pub connection: usize,
    pub start: (f32, f32),
    pub end: (f32, f32),
}

/// Maps landmark coordinates into the letterboxed viewport rectangle.
///
/// Rotation is applied here and only here, and only for decoder-oriented
/// coordinates, so a landmark is never rotated twice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayProjector {
    rect: DisplayRect,
    display: Size,
    geometry: FrameGeometry,
    convention: CoordinateConvention,
}

impl OverlayProjector {
    #[must_use]
    pub fn new(viewport: Size, geometry: FrameGeometry, convention: CoordinateConvention) -> Self {
        let display = geometry.display_size();
        Self {
            rect: DisplayRect::fit(viewport, display),
            display,
            geometry,
            convention,
        }
    }

    #[must_use]
    pub const fn rect(&self) -> DisplayRect {
        self.rect
    }

    /// Rotation-corrected frame size used for mapping.
    #[must_use]
    pub const fn display_size(&self) -> Size {
        self.display
    }

    /// Whether the frame size is known well enough to map points.
    #[must_use]
    pub fn can_project(&self) -> bool {
        self.display.is_positive()
    }

    /// Map a landmark coordinate into the viewport.
    #[must_use]
    pub fn project(&self, x: f32, y: f32) -> (f32, f32) {
        let (fx, fy) = match self.convention {
            CoordinateConvention::Display => (x, y),
            CoordinateConvention::Decoded => self.geometry.to_display_point(x, y),
            CoordinateConvention::Normalized => (x * self.display.width, y * self.display.height),
        };
        self.rect
            .map_frame_to_view(fx, fy, self.display.width, self.display.height)
    }
}

/// Everything to draw for one playback position, in viewport units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayScene {
    /// Playback position the scene was composed for.
    pub position_ms: u64,
    /// Timestamp of the landmark frame shown, `None` when there is nothing to show.
    pub frame_timestamp_ms: Option<u64>,
    /// Viewport area covered by the video image.
    pub rect: DisplayRect,
    pub joints: Vec<ViewJoint>,
    pub bones: Vec<ViewBone>,
}

impl OverlayScene {
    /// Compose the overlay for `position_ms`.
    ///
    /// When `geometry` has no usable size, the display-oriented frame size
    /// attached to the series (if any) is used instead. The scene is empty when
    /// the series has no frames or neither size is known; callers draw nothing
    /// in that case.
    #[must_use]
    pub fn compose(
        engine: &OverlayEngine,
        position_ms: u64,
        viewport: Size,
        geometry: FrameGeometry,
    ) -> Self {
        let geometry = if geometry.display_size().is_positive() {
            geometry
        } else {
            engine
                .series()
                .frame_size()
                .map_or(geometry, |size| FrameGeometry::new(size, Rotation::None))
        };
        let projector = OverlayProjector::new(
            viewport,
            geometry,
            engine.series().coordinate_space.convention(),
        );
        let mut scene = Self {
            position_ms,
            rect: projector.rect(),
            ..Self::default()
        };

        if !projector.can_project() {
            return scene;
        }
        let Some(frame) = engine.frame_at(position_ms) else {
            return scene;
        };

        scene.frame_timestamp_ms = Some(frame.timestamp_ms);
        scene.joints = engine
            .landmarks_for_frame(frame)
            .into_iter()
            .map(|lm| {
                let (x, y) = projector.project(lm.x, lm.y);
                ViewJoint {
                    index: lm.index,
                    x,
                    y,
                    visibility: lm.visibility,
                }
            })
            .collect();
        scene.bones = engine
            .bones_for_frame(frame)
            .into_iter()
            .map(|bone| ViewBone {
                connection: bone.connection,
                start: projector.project(bone.ax, bone.ay),
                end: projector.project(bone.bx, bone.by),
            })
            .collect();
        scene
    }

    /// Whether there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty() && self.bones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{Connection, CoordinateSpace, OverlayFrame, OverlaySeries, Point};

    const EPS: f32 = 1e-3;

    fn engine(tag: &str, points: Vec<Option<Point>>) -> OverlayEngine {
        OverlayEngine::new(OverlaySeries::new(
            CoordinateSpace::from_tag(tag),
            0.5,
            vec![Connection::new(0, 1).unwrap()],
            vec![OverlayFrame::new(0, points)],
        ))
    }

    fn pt(x: f32, y: f32) -> Option<Point> {
        Some(Point {
            x,
            y,
            visibility: 1.0,
        })
    }

    #[test]
    fn test_compose_maps_into_letterbox() {
        let engine = engine("video_px", vec![pt(0.0, 0.0), pt(1920.0, 1080.0)]);
        let geometry = FrameGeometry::new(Size::new(1920.0, 1080.0), Rotation::None);
        let scene = OverlayScene::compose(&engine, 0, Size::new(1000.0, 1000.0), geometry);

        assert_eq!(scene.frame_timestamp_ms, Some(0));
        assert_eq!(scene.joints.len(), 2);
        assert!((scene.joints[0].y - 218.75).abs() < EPS);
        assert!((scene.joints[1].x - 1000.0).abs() < EPS);
        assert!((scene.joints[1].y - 781.25).abs() < EPS);
        assert_eq!(scene.bones.len(), 1);
        assert_eq!(scene.bones[0].start, (scene.joints[0].x, scene.joints[0].y));
    }

    #[test]
    fn test_compose_portrait_video_uses_display_size() {
        // Decoder reports landscape, the player rotates it to portrait
        let engine = engine("video_px", vec![pt(540.0, 960.0), None]);
        let geometry = FrameGeometry::new(Size::new(1920.0, 1080.0), Rotation::Cw90);
        let scene = OverlayScene::compose(&engine, 0, Size::new(1000.0, 1000.0), geometry);

        assert!((scene.rect.width - 562.5).abs() < EPS);
        assert!((scene.rect.height - 1000.0).abs() < EPS);
        // Frame center lands on viewport center
        assert!((scene.joints[0].x - 500.0).abs() < EPS);
        assert!((scene.joints[0].y - 500.0).abs() < EPS);
        assert!(scene.bones.is_empty());
    }

    #[test]
    fn test_decoded_coordinates_are_rotated_once() {
        let geometry = FrameGeometry::new(Size::new(1920.0, 1080.0), Rotation::Cw90);
        let viewport = Size::new(1080.0, 1920.0);

        let decoded = engine("raw_px", vec![pt(0.0, 0.0), None]);
        let scene = OverlayScene::compose(&decoded, 0, viewport, geometry);
        assert!((scene.joints[0].x - 1080.0).abs() < EPS);
        assert!(scene.joints[0].y.abs() < EPS);

        let display = engine("video_px", vec![pt(1080.0, 0.0), None]);
        let scene_display = OverlayScene::compose(&display, 0, viewport, geometry);
        assert_eq!(scene.joints[0].x, scene_display.joints[0].x);
    }

    #[test]
    fn test_normalized_coordinates() {
        let engine = engine("normalized", vec![pt(0.5, 0.5), None]);
        let geometry = FrameGeometry::new(Size::new(1920.0, 1080.0), Rotation::None);
        let scene = OverlayScene::compose(&engine, 0, Size::new(1000.0, 1000.0), geometry);
        assert!((scene.joints[0].x - 500.0).abs() < EPS);
        assert!((scene.joints[0].y - 500.0).abs() < EPS);
    }

    #[test]
    fn test_unknown_frame_size_draws_nothing() {
        let engine = engine("video_px", vec![pt(1.0, 1.0), pt(2.0, 2.0)]);
        let viewport = Size::new(800.0, 600.0);
        let scene = OverlayScene::compose(&engine, 0, viewport, FrameGeometry::default());
        assert!(scene.is_empty());
        assert!(scene.frame_timestamp_ms.is_none());
        assert_eq!(scene.rect, DisplayRect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_attached_frame_size_fills_in_unknown_geometry() {
        let series = OverlaySeries::new(
            CoordinateSpace::from_tag("video_px"),
            0.5,
            Vec::new(),
            vec![OverlayFrame::new(0, vec![pt(1080.0, 1920.0)])],
        )
        .with_frame_size(Size::new(1080.0, 1920.0));
        let engine = OverlayEngine::new(series);

        let viewport = Size::new(540.0, 960.0);
        let scene = OverlayScene::compose(&engine, 0, viewport, FrameGeometry::default());
        assert_eq!(scene.frame_timestamp_ms, Some(0));
        assert_eq!(scene.rect, DisplayRect::new(0.0, 0.0, 540.0, 960.0));
        assert!((scene.joints[0].x - 540.0).abs() < EPS);
        assert!((scene.joints[0].y - 960.0).abs() < EPS);

        // An explicit geometry still wins over the attached size
        let explicit = FrameGeometry::new(Size::new(540.0, 960.0), Rotation::None);
        let scene = OverlayScene::compose(&engine, 0, viewport, explicit);
        assert!((scene.joints[0].x - 1080.0).abs() < EPS);
    }
}
