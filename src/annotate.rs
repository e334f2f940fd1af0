// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Drawing overlay scenes onto images.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut};

use crate::config::{OverlayConfig, MAX_STROKE_PX};
use crate::engine::OverlayEngine;
use crate::error::{OverlayError, Result};
use crate::scene::OverlayScene;
use crate::viewport::{FrameGeometry, Size};

/// Find the next available run directory (render, render2, render3, etc.)
#[must_use]
pub fn find_next_run_dir(base: &Path, prefix: &str) -> PathBuf {
    let first = base.join(prefix);
    if !first.exists() {
        return first;
    }

    (2..)
        .map(|i| base.join(format!("{prefix}{i}")))
        .find(|dir| !dir.exists())
        .unwrap_or(first)
}

/// Create a black canvas the size of the viewport (at least 1x1).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn blank_canvas(viewport: Size) -> RgbImage {
    let width = viewport.width.round().max(1.0) as u32;
    let height = viewport.height.round().max(1.0) as u32;
    RgbImage::new(width, height)
}

/// Draw a thick line as parallel one-pixel segments with round caps.
///
/// The width is capped at [`MAX_STROKE_PX`].
#[allow(clippy::cast_possible_truncation)]
fn draw_thick_line(
    canvas: &mut RgbImage,
    start: (f32, f32),
    end: (f32, f32),
    width: f32,
    color: Rgb<u8>,
) {
    let width = width.min(MAX_STROKE_PX);
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let len = dx.hypot(dy);
    if width <= 1.0 || len == 0.0 {
        draw_line_segment_mut(canvas, start, end, color);
        return;
    }

    let (nx, ny) = (-dy / len, dx / len);
    let half = width / 2.0;
    let mut offset = -half;
    while offset <= half {
        draw_line_segment_mut(
            canvas,
            (start.0 + nx * offset, start.1 + ny * offset),
            (end.0 + nx * offset, end.1 + ny * offset),
            color,
        );
        offset += 0.5;
    }

    let cap = half.round() as i32;
    for (x, y) in [start, end] {
        draw_filled_circle_mut(canvas, (x.round() as i32, y.round() as i32), cap, color);
    }
}

/// Draw a circle outline with the given stroke width.
#[allow(clippy::cast_possible_truncation)]
fn draw_ring(
    canvas: &mut RgbImage,
    center: (f32, f32),
    radius: f32,
    stroke: f32,
    color: Rgb<u8>,
) {
    let (radius, stroke) = (radius.min(MAX_STROKE_PX), stroke.min(MAX_STROKE_PX));
    let center = (center.0.round() as i32, center.1.round() as i32);
    let inner = (radius - stroke / 2.0).round().max(0.0) as i32;
    let outer = (radius + stroke / 2.0).round().max(0.0) as i32;
    for r in inner..=outer.max(inner) {
        draw_hollow_circle_mut(canvas, center, r, color);
    }
}

/// Draw bones, then joints on top, using the styling from `config`.
///
/// Points outside the canvas are clipped by the drawing primitives.
pub fn draw_scene(canvas: &mut RgbImage, scene: &OverlayScene, config: &OverlayConfig) {
    if config.show_bones {
        for bone in &scene.bones {
            let color = config.bone_color_for(bone.connection).into();
            draw_thick_line(canvas, bone.start, bone.end, config.bone_width, color);
        }
    }

    if config.show_joints {
        let color = config.joint_color.into();
        for joint in &scene.joints {
            draw_ring(
                canvas,
                (joint.x, joint.y),
                config.joint_radius,
                config.joint_stroke,
                color,
            );
        }
    }
}

/// Place a display-oriented video frame into its letterbox rectangle on the canvas.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_background(canvas: &mut RgbImage, frame: &DynamicImage, scene: &OverlayScene) {
    let rect = scene.rect;
    let width = rect.width.round() as u32;
    let height = rect.height.round() as u32;
    if width == 0 || height == 0 {
        return;
    }
    let resized = imageops::resize(&frame.to_rgb8(), width, height, FilterType::Triangle);
    imageops::overlay(
        canvas,
        &resized,
        i64::from(rect.left.round() as i32),
        i64::from(rect.top.round() as i32),
    );
}

/// Render the overlay for one playback position onto a viewport-sized canvas.
///
/// If `background` is given it is letterboxed into the same rectangle the
/// overlay is mapped into, which makes misalignment easy to spot.
///
/// # Returns
///
/// The rendered image and the scene that was drawn.
#[must_use]
pub fn render_overlay(
    engine: &OverlayEngine,
    position_ms: u64,
    viewport: Size,
    geometry: FrameGeometry,
    background: Option<&DynamicImage>,
    config: &OverlayConfig,
) -> (RgbImage, OverlayScene) {
    let scene = OverlayScene::compose(engine, position_ms, viewport, geometry);
    let mut canvas = blank_canvas(viewport);
    if let Some(frame) = background {
        draw_background(&mut canvas, frame, &scene);
    }
    draw_scene(&mut canvas, &scene, config);
    (canvas, scene)
}

/// Save a rendered overlay, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the image cannot be encoded.
pub fn save_render(image: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            OverlayError::IoError(format!(
                "Failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }
    image.save(path)?;
    Ok(())
}
