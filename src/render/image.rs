//! Annotation rasterization using tiny-skia
//!
//! These functions flatten committed annotations onto an RgbaImage before
//! export. Drawing happens in insertion order, matching the editor canvas.

use image::RgbaImage;
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::config::ShapeColor;
use crate::domain::{
    Annotation, ArrowAnnotation, EllipseAnnotation, LineAnnotation, RectAnnotation,
};

use super::geometry::{self, arrow, shape};

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let (w, h) = (img.width(), img.height());
    let Some(mut pixmap) = Pixmap::from_vec(
        img.as_raw().clone(),
        tiny_skia::IntSize::from_wh(w, h).unwrap(),
    ) else {
        return;
    };

    f(&mut pixmap);

    img.copy_from_slice(pixmap.data());
}

fn shape_paint(color: ShapeColor) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn shape_stroke() -> Stroke {
    Stroke {
        width: shape::THICKNESS,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

/// Build an ellipse path using cubic bezier curves
fn build_ellipse_path(cx: f32, cy: f32, rx: f32, ry: f32) -> Option<tiny_skia::Path> {
    let kx = rx * shape::BEZIER_K;
    let ky = ry * shape::BEZIER_K;

    let mut pb = PathBuilder::new();

    // Start at top
    pb.move_to(cx, cy - ry);

    // Top to right
    pb.cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);

    // Right to bottom
    pb.cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);

    // Bottom to left
    pb.cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);

    // Left to top
    pb.cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);

    pb.close();
    pb.finish()
}

fn draw_arrow(pixmap: &mut Pixmap, a: &ArrowAnnotation) {
    let paint = shape_paint(a.color);

    // Shaft
    let mut pb = PathBuilder::new();
    pb.move_to(a.start.x, a.start.y);
    pb.line_to(a.end.x, a.end.y);
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, &paint, &shape_stroke(), Transform::identity(), None);
    }

    // Filled head triangle: tip at the end point, two base corners
    if let Some((b1x, b1y, b2x, b2y)) =
        arrow::head_points(a.start.x, a.start.y, a.end.x, a.end.y)
    {
        let mut pb = PathBuilder::new();
        pb.move_to(a.end.x, a.end.y);
        pb.line_to(b1x, b1y);
        pb.line_to(b2x, b2y);
        pb.close();
        if let Some(path) = pb.finish() {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }
}

fn draw_line(pixmap: &mut Pixmap, l: &LineAnnotation) {
    let mut pb = PathBuilder::new();
    pb.move_to(l.start.x, l.start.y);
    pb.line_to(l.end.x, l.end.y);
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(
            &path,
            &shape_paint(l.color),
            &shape_stroke(),
            Transform::identity(),
            None,
        );
    }
}

fn draw_rect(pixmap: &mut Pixmap, r: &RectAnnotation) {
    let (min_x, min_y, max_x, max_y) =
        geometry::normalize_rect(r.start.x, r.start.y, r.end.x, r.end.y);
    let paint = shape_paint(r.color);

    if r.filled {
        if let Some(rect) = tiny_skia::Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y)
        {
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
        return;
    }

    let mut pb = PathBuilder::new();
    pb.move_to(min_x, min_y);
    pb.line_to(max_x, min_y);
    pb.line_to(max_x, max_y);
    pb.line_to(min_x, max_y);
    pb.close();
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, &paint, &shape_stroke(), Transform::identity(), None);
    }
}

fn draw_ellipse(pixmap: &mut Pixmap, e: &EllipseAnnotation) {
    let (min_x, min_y, max_x, max_y) =
        geometry::normalize_rect(e.start.x, e.start.y, e.end.x, e.end.y);
    let (cx, cy, rx, ry) = geometry::ellipse_from_bounds(min_x, min_y, max_x, max_y);

    let Some(path) = build_ellipse_path(cx, cy, rx, ry) else {
        return;
    };
    let paint = shape_paint(e.color);
    if e.filled {
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    } else {
        pixmap.stroke_path(&path, &paint, &shape_stroke(), Transform::identity(), None);
    }
}

/// Draw annotations over the image in insertion order.
pub fn draw_annotations(img: &mut RgbaImage, annotations: &[Annotation]) {
    if annotations.is_empty() {
        return;
    }

    with_pixmap(img, |pixmap| {
        for annotation in annotations {
            match annotation {
                Annotation::Arrow(a) => draw_arrow(pixmap, a),
                Annotation::Line(l) => draw_line(pixmap, l),
                Annotation::Rect(r) => draw_rect(pixmap, r),
                Annotation::Ellipse(e) => draw_ellipse(pixmap, e),
            }
        }
    });
}
