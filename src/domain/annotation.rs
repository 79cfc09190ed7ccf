//! Annotation types for drawing on captured screenshots
//!
//! All coordinates are in image pixel space, stored as the two raw gesture
//! points; normalization happens at render time.

use crate::config::ShapeColor;

use super::geometry::{Point, Rect};

/// Arrow annotation: a stroked shaft with a filled triangular head.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowAnnotation {
    pub start: Point,
    pub end: Point,
    pub color: ShapeColor,
}

/// Straight line annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct LineAnnotation {
    pub start: Point,
    pub end: Point,
    pub color: ShapeColor,
}

/// Rectangle annotation, outlined or filled.
#[derive(Clone, Debug, PartialEq)]
pub struct RectAnnotation {
    pub start: Point,
    pub end: Point,
    pub color: ShapeColor,
    /// Filled when the modifier key was held while drawing.
    pub filled: bool,
}

/// Ellipse annotation inscribed in the dragged bounds, outlined or filled.
#[derive(Clone, Debug, PartialEq)]
pub struct EllipseAnnotation {
    pub start: Point,
    pub end: Point,
    pub color: ShapeColor,
    pub filled: bool,
}

/// Unified annotation type, drawn in insertion order.
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    Arrow(ArrowAnnotation),
    Line(LineAnnotation),
    Rect(RectAnnotation),
    Ellipse(EllipseAnnotation),
}

impl Annotation {
    fn points_mut(&mut self) -> (&mut Point, &mut Point) {
        match self {
            Annotation::Arrow(a) => (&mut a.start, &mut a.end),
            Annotation::Line(l) => (&mut l.start, &mut l.end),
            Annotation::Rect(r) => (&mut r.start, &mut r.end),
            Annotation::Ellipse(e) => (&mut e.start, &mut e.end),
        }
    }

    fn points(&self) -> (Point, Point) {
        match self {
            Annotation::Arrow(a) => (a.start, a.end),
            Annotation::Line(l) => (l.start, l.end),
            Annotation::Rect(r) => (r.start, r.end),
            Annotation::Ellipse(e) => (e.start, e.end),
        }
    }

    /// Bounding rectangle, used for drag hit-testing.
    pub fn bounds(&self) -> Rect {
        let (start, end) = self.points();
        Rect::from_points(start, end)
    }

    /// Move the annotation by the given offset.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        let (start, end) = self.points_mut();
        start.x += dx;
        start.y += dy;
        end.x += dx;
        end.y += dy;
    }
}
