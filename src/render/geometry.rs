//! Shared geometry calculations for annotations

/// Arrow geometry constants
pub mod arrow {
    /// Arrow head length along the shaft in pixels
    pub const HEAD_LENGTH: f32 = 15.0;
    /// Arrow head half-width perpendicular to the shaft in pixels
    pub const HEAD_WIDTH: f32 = 10.0;
    /// Minimum arrow length to be drawn
    pub const MIN_LENGTH: f32 = 5.0;

    /// Calculate the two base corners of the arrow head triangle.
    ///
    /// Returns (base1_x, base1_y, base2_x, base2_y); the tip is the arrow
    /// end point itself. `None` for arrows too short to carry a head.
    pub fn head_points(
        start_x: f32,
        start_y: f32,
        end_x: f32,
        end_y: f32,
    ) -> Option<(f32, f32, f32, f32)> {
        let dx = end_x - start_x;
        let dy = end_y - start_y;
        let length = (dx * dx + dy * dy).sqrt();
        if length < MIN_LENGTH {
            return None;
        }

        // Unit direction vector (pointing from start to end)
        let nx = dx / length;
        let ny = dy / length;

        // Base of the head triangle sits HEAD_LENGTH back along the shaft
        let base_x = end_x - nx * HEAD_LENGTH;
        let base_y = end_y - ny * HEAD_LENGTH;

        // Perpendicular offsets to either side
        let perp_x = -ny * HEAD_WIDTH;
        let perp_y = nx * HEAD_WIDTH;

        Some((
            base_x + perp_x,
            base_y + perp_y,
            base_x - perp_x,
            base_y - perp_y,
        ))
    }
}

/// Shape (rectangle/ellipse/line) geometry constants
pub mod shape {
    /// Default stroke thickness in pixels
    pub const THICKNESS: f32 = 2.0;

    /// Ellipse bezier approximation constant: 4/3 * (sqrt(2) - 1)
    pub const BEZIER_K: f32 = 0.552_284_8;
}

/// Normalize min/max coordinates from arbitrary start/end points
#[inline]
pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32, f32, f32) {
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    (min_x, min_y, max_x, max_y)
}

/// Calculate ellipse center and radii from bounding box
#[inline]
pub fn ellipse_from_bounds(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> (f32, f32, f32, f32) {
    let cx = (min_x + max_x) * 0.5;
    let cy = (min_y + max_y) * 0.5;
    let rx = ((max_x - min_x) * 0.5).max(1.0);
    let ry = ((max_y - min_y) * 0.5).max(1.0);
    (cx, cy, rx, ry)
}
