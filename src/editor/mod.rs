//! Annotation editor over a captured pixel buffer
//!
//! Routes pointer gestures to the active tool. Every tool is a
//! press-drag-release gesture in image coordinates: shapes commit on
//! release, blur and crop apply destructively to the working buffer on
//! release, and the drag tool moves a committed annotation under the
//! pointer.

use image::RgbaImage;

use crate::blur;
use crate::capture::pixels::PixelBuffer;
use crate::config::{AppConfig, ShapeColor};
use crate::domain::annotation::{
    Annotation, ArrowAnnotation, EllipseAnnotation, LineAnnotation, RectAnnotation,
};
use crate::domain::geometry::{Point, Rect};
use crate::error::Result;
use crate::render;

/// Editing tool selected in the host toolbar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    #[default]
    Rectangle,
    Ellipse,
    Arrow,
    Line,
    Blur,
    Crop,
    Drag,
}

/// In-flight pointer gesture.
#[derive(Clone, Copy, Debug)]
enum Gesture {
    /// Two-corner drag shared by the shape, blur and crop tools.
    Corner { start: Point, current: Point },
    /// Moving an existing annotation.
    Move { index: usize, last: Point },
}

/// Annotation editor state over one captured image.
pub struct Editor {
    image: PixelBuffer,
    annotations: Vec<Annotation>,
    tool: Tool,
    gesture: Option<Gesture>,
    shape_color: ShapeColor,
    shape_filled: bool,
    blur_intensity: i32,
}

impl Editor {
    /// Create an editor over a captured buffer with tool settings from
    /// config.
    pub fn new(image: PixelBuffer, config: &AppConfig) -> Self {
        Self {
            image,
            annotations: Vec::new(),
            tool: Tool::default(),
            gesture: None,
            shape_color: config.shape_color,
            shape_filled: config.shape_filled,
            blur_intensity: config.blur_intensity,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools, discarding any in-flight gesture.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            self.gesture = None;
        }
        self.tool = tool;
    }

    pub fn set_shape_color(&mut self, color: ShapeColor) {
        self.shape_color = color;
    }

    pub fn set_shape_filled(&mut self, filled: bool) {
        self.shape_filled = filled;
    }

    pub fn set_blur_intensity(&mut self, intensity: i32) {
        self.blur_intensity = intensity;
    }

    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Begin a gesture at `point`. Ignored while one is active; the drag
    /// tool additionally requires an annotation under the pointer.
    pub fn pointer_down(&mut self, point: Point) {
        if self.gesture.is_some() {
            return;
        }
        self.gesture = match self.tool {
            Tool::Drag => self
                .hit_test(point)
                .map(|index| Gesture::Move { index, last: point }),
            _ => Some(Gesture::Corner {
                start: point,
                current: point,
            }),
        };
    }

    /// Update the in-flight gesture. No-op without one.
    pub fn pointer_move(&mut self, point: Point) {
        match &mut self.gesture {
            Some(Gesture::Corner { current, .. }) => *current = point,
            Some(Gesture::Move { index, last }) => {
                let (dx, dy) = (point.x - last.x, point.y - last.y);
                self.annotations[*index].translate(dx, dy);
                *last = point;
            }
            None => {}
        }
    }

    /// Finish the gesture, committing per the active tool.
    pub fn pointer_up(&mut self, point: Point) -> Result<()> {
        self.pointer_move(point);
        let Some(Gesture::Corner { start, current }) = self.gesture.take() else {
            return Ok(());
        };

        match self.tool {
            Tool::Rectangle => self.annotations.push(Annotation::Rect(RectAnnotation {
                start,
                end: current,
                color: self.shape_color,
                filled: self.shape_filled,
            })),
            Tool::Ellipse => self.annotations.push(Annotation::Ellipse(EllipseAnnotation {
                start,
                end: current,
                color: self.shape_color,
                filled: self.shape_filled,
            })),
            Tool::Arrow => self.annotations.push(Annotation::Arrow(ArrowAnnotation {
                start,
                end: current,
                color: self.shape_color,
            })),
            Tool::Line => self.annotations.push(Annotation::Line(LineAnnotation {
                start,
                end: current,
                color: self.shape_color,
            })),
            Tool::Blur => {
                let selection = Rect::from_points(start, current).to_pixels();
                if let Some(region) = selection.intersect(self.image.bounds()) {
                    blur::apply_blur(&mut self.image, region, self.blur_intensity)?;
                }
            }
            Tool::Crop => {
                let selection = Rect::from_points(start, current).to_pixels();
                if let Some(region) = selection.intersect(self.image.bounds())
                    && let Some(cropped) = self.image.copy_region(region)
                {
                    self.image = cropped;
                    for annotation in &mut self.annotations {
                        annotation.translate(-(region.x as f32), -(region.y as f32));
                    }
                }
            }
            Tool::Drag => {}
        }
        Ok(())
    }

    /// Discard the in-flight gesture.
    pub fn cancel(&mut self) {
        self.gesture = None;
    }

    /// Live preview of the gesture in progress, for host overlay
    /// rendering. Blur and crop selections preview as a white rectangle,
    /// the way the capture overlay draws its selection.
    pub fn preview(&self) -> Option<Annotation> {
        let Some(Gesture::Corner { start, current }) = self.gesture else {
            return None;
        };
        let annotation = match self.tool {
            Tool::Rectangle => Annotation::Rect(RectAnnotation {
                start,
                end: current,
                color: self.shape_color,
                filled: self.shape_filled,
            }),
            Tool::Ellipse => Annotation::Ellipse(EllipseAnnotation {
                start,
                end: current,
                color: self.shape_color,
                filled: self.shape_filled,
            }),
            Tool::Arrow => Annotation::Arrow(ArrowAnnotation {
                start,
                end: current,
                color: self.shape_color,
            }),
            Tool::Line => Annotation::Line(LineAnnotation {
                start,
                end: current,
                color: self.shape_color,
            }),
            Tool::Blur | Tool::Crop => Annotation::Rect(RectAnnotation {
                start,
                end: current,
                color: ShapeColor::WHITE,
                filled: false,
            }),
            Tool::Drag => return None,
        };
        Some(annotation)
    }

    /// Topmost annotation whose bounds contain `point`.
    fn hit_test(&self, point: Point) -> Option<usize> {
        self.annotations
            .iter()
            .rposition(|annotation| annotation.bounds().contains(point))
    }

    /// Flatten the working image and annotations into an RGBA raster.
    pub fn flatten(&self) -> RgbaImage {
        let mut img = self.image.to_rgba();
        render::image::draw_annotations(&mut img, &self.annotations);
        img
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::PixelRect;

    fn editor_over(width: u32, height: u32) -> Editor {
        let mut image = PixelBuffer::new(width, height);
        image.fill([100, 100, 100, 255]);
        Editor::new(image, &AppConfig::default())
    }

    fn drag(editor: &mut Editor, from: Point, to: Point) {
        editor.pointer_down(from);
        editor.pointer_move(to);
        editor.pointer_up(to).unwrap();
    }

    #[test]
    fn test_shape_tools_commit_on_release() {
        let mut editor = editor_over(64, 64);
        for (tool, expected) in [
            (Tool::Rectangle, 1),
            (Tool::Ellipse, 2),
            (Tool::Arrow, 3),
            (Tool::Line, 4),
        ] {
            editor.set_tool(tool);
            drag(&mut editor, Point::new(4.0, 4.0), Point::new(40.0, 30.0));
            assert_eq!(editor.annotations().len(), expected);
        }
    }

    #[test]
    fn test_pointer_down_while_dragging_is_ignored() {
        let mut editor = editor_over(64, 64);
        editor.pointer_down(Point::new(0.0, 0.0));
        editor.pointer_down(Point::new(50.0, 50.0));
        editor.pointer_move(Point::new(10.0, 10.0));
        editor.pointer_up(Point::new(10.0, 10.0)).unwrap();

        assert_eq!(editor.annotations().len(), 1);
        assert_eq!(
            editor.annotations()[0].bounds(),
            Rect::new(0.0, 0.0, 10.0, 10.0)
        );
    }

    #[test]
    fn test_cancel_discards_gesture_without_commit() {
        let mut editor = editor_over(64, 64);
        editor.pointer_down(Point::new(0.0, 0.0));
        editor.pointer_move(Point::new(20.0, 20.0));
        editor.cancel();
        editor.pointer_up(Point::new(20.0, 20.0)).unwrap();
        assert!(editor.annotations().is_empty());
    }

    #[test]
    fn test_blur_tool_rewrites_selection_interior_only() {
        let mut editor = editor_over(32, 32);
        // A white spike inside the selection, so the blur has a gradient
        // to smear
        editor.image.set_pixel(16, 16, [255, 255, 255, 255]);
        let before = editor.image.clone();

        editor.set_tool(Tool::Blur);
        editor.set_blur_intensity(10);
        drag(&mut editor, Point::new(8.0, 8.0), Point::new(24.0, 24.0));

        assert_ne!(editor.image().pixel(16, 16), before.pixel(16, 16));
        // Outside the selection nothing moved
        assert_eq!(editor.image().pixel(4, 4), before.pixel(4, 4));
        assert_eq!(editor.image().pixel(30, 30), before.pixel(30, 30));
        assert!(editor.annotations().is_empty());
    }

    #[test]
    fn test_blur_selection_is_clamped_to_image() {
        let mut editor = editor_over(16, 16);
        editor.set_tool(Tool::Blur);
        // Dragging past the image edge must not error
        drag(&mut editor, Point::new(8.0, 8.0), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_degenerate_blur_selection_is_a_noop() {
        let mut editor = editor_over(16, 16);
        let before = editor.image.clone();
        editor.set_tool(Tool::Blur);
        drag(&mut editor, Point::new(8.0, 8.0), Point::new(8.0, 8.0));
        assert_eq!(*editor.image(), before);
    }

    #[test]
    fn test_crop_replaces_image_and_translates_annotations() {
        let mut editor = editor_over(64, 64);
        editor.image.set_pixel(20, 20, [1, 2, 3, 255]);

        editor.set_tool(Tool::Rectangle);
        drag(&mut editor, Point::new(20.0, 20.0), Point::new(40.0, 40.0));

        editor.set_tool(Tool::Crop);
        drag(&mut editor, Point::new(10.0, 10.0), Point::new(50.0, 50.0));

        assert_eq!(editor.image().width(), 40);
        assert_eq!(editor.image().height(), 40);
        assert_eq!(editor.image().pixel(10, 10), [1, 2, 3, 255]);
        assert_eq!(
            editor.annotations()[0].bounds(),
            Rect::new(10.0, 10.0, 20.0, 20.0)
        );
    }

    #[test]
    fn test_drag_tool_moves_topmost_annotation() {
        let mut editor = editor_over(64, 64);
        editor.set_tool(Tool::Rectangle);
        drag(&mut editor, Point::new(0.0, 0.0), Point::new(20.0, 20.0));
        drag(&mut editor, Point::new(10.0, 10.0), Point::new(30.0, 30.0));

        editor.set_tool(Tool::Drag);
        // (15,15) hits both; the later annotation wins
        drag(&mut editor, Point::new(15.0, 15.0), Point::new(25.0, 35.0));

        assert_eq!(
            editor.annotations()[1].bounds(),
            Rect::new(20.0, 30.0, 20.0, 20.0)
        );
        assert_eq!(
            editor.annotations()[0].bounds(),
            Rect::new(0.0, 0.0, 20.0, 20.0)
        );
    }

    #[test]
    fn test_drag_tool_needs_an_annotation_under_the_pointer() {
        let mut editor = editor_over(64, 64);
        editor.set_tool(Tool::Drag);
        editor.pointer_down(Point::new(5.0, 5.0));
        assert!(editor.preview().is_none());
        editor.pointer_move(Point::new(10.0, 10.0));
        editor.pointer_up(Point::new(10.0, 10.0)).unwrap();
        assert!(editor.annotations().is_empty());
    }

    #[test]
    fn test_preview_follows_tool_and_gesture() {
        let mut editor = editor_over(64, 64);
        assert!(editor.preview().is_none());

        editor.set_tool(Tool::Crop);
        editor.pointer_down(Point::new(2.0, 2.0));
        editor.pointer_move(Point::new(12.0, 22.0));
        match editor.preview() {
            Some(Annotation::Rect(rect)) => {
                assert_eq!(rect.color, ShapeColor::WHITE);
                assert!(!rect.filled);
                assert_eq!(
                    Rect::from_points(rect.start, rect.end),
                    Rect::new(2.0, 2.0, 10.0, 20.0)
                );
            }
            other => panic!("unexpected preview {other:?}"),
        }
        editor.cancel();
    }

    #[test]
    fn test_switching_tools_discards_gesture() {
        let mut editor = editor_over(64, 64);
        editor.set_tool(Tool::Rectangle);
        editor.pointer_down(Point::new(0.0, 0.0));
        editor.set_tool(Tool::Line);
        editor.pointer_up(Point::new(30.0, 30.0)).unwrap();
        assert!(editor.annotations().is_empty());
    }

    #[test]
    fn test_flatten_burns_annotations_over_image() {
        let mut editor = editor_over(32, 32);
        editor.set_shape_color(ShapeColor {
            r: 1.0,
            g: 0.0,
            b: 0.0,
        });
        editor.set_shape_filled(true);
        editor.set_tool(Tool::Rectangle);
        drag(&mut editor, Point::new(8.0, 8.0), Point::new(24.0, 24.0));

        let flat = editor.flatten();
        assert_eq!(flat.get_pixel(16, 16).0, [255, 0, 0, 255]);
        // BGRA (100,100,100) converts to grey RGBA outside the shape
        assert_eq!(flat.get_pixel(2, 2).0, [100, 100, 100, 255]);
    }

    #[test]
    fn test_crop_region_matches_pixel_truncation() {
        let mut editor = editor_over(16, 16);
        editor.set_tool(Tool::Crop);
        drag(&mut editor, Point::new(1.9, 1.9), Point::new(9.2, 9.2));
        // from_points gives (1.9, 1.9, 7.3, 7.3), truncating to (1, 1, 7, 7)
        assert_eq!(
            editor.image().bounds(),
            PixelRect::new(0, 0, 7, 7)
        );
    }
}
