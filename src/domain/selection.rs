//! Selection state machine for drag-to-select region capture

use super::geometry::{Point, Rect};

/// State of the drag selection.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    Selecting,
}

/// Converts a pointer-down/move/up sequence into a selection rectangle.
///
/// One selection at a time: a second pointer-down while selecting is
/// ignored. The live rectangle is exposed so the host can render the
/// overlay border and dim everything outside it.
#[derive(Debug, Default)]
pub struct RegionSelector {
    state: SelectionState,
    anchor: Point,
    rect: Rect,
}

impl RegionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Start a selection at `anchor`. Ignored while one is active.
    pub fn begin(&mut self, anchor: Point) {
        if self.state == SelectionState::Selecting {
            return;
        }
        self.state = SelectionState::Selecting;
        self.anchor = anchor;
        self.rect = Rect::from_points(anchor, anchor);
    }

    /// Recompute the rectangle from the anchor and the current pointer
    /// position. No-op while idle.
    pub fn update(&mut self, current: Point) {
        if self.state != SelectionState::Selecting {
            return;
        }
        self.rect = Rect::from_points(self.anchor, current);
    }

    /// Finish the selection and return the final rectangle.
    ///
    /// The rectangle may be degenerate (zero width or height); the capture
    /// guard rejects it downstream. Returns `None` while idle.
    pub fn end(&mut self, final_point: Point) -> Option<Rect> {
        if self.state != SelectionState::Selecting {
            return None;
        }
        self.update(final_point);
        self.state = SelectionState::Idle;
        let rect = self.rect;
        self.rect = Rect::default();
        Some(rect)
    }

    /// Abort the selection, discarding the rectangle. No capture follows.
    pub fn cancel(&mut self) {
        self.state = SelectionState::Idle;
        self.rect = Rect::default();
    }

    /// Live rectangle for overlay rendering, while selecting.
    pub fn rect(&self) -> Option<Rect> {
        (self.state == SelectionState::Selecting).then_some(self.rect)
    }

    /// Live `"WxH"` label shown beside the selection rectangle.
    pub fn size_label(&self) -> Option<String> {
        (self.state == SelectionState::Selecting)
            .then(|| format!("{}x{}", self.rect.width as i32, self.rect.height as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_recomputes_from_anchor() {
        let mut selector = RegionSelector::new();
        selector.begin(Point::new(10.0, 10.0));
        selector.update(Point::new(5.0, 5.0));
        assert_eq!(selector.rect(), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));

        selector.update(Point::new(20.0, 4.0));
        assert_eq!(selector.rect(), Some(Rect::new(10.0, 4.0, 10.0, 6.0)));
    }

    #[test]
    fn test_end_finalizes_and_returns_to_idle() {
        let mut selector = RegionSelector::new();
        selector.begin(Point::new(10.0, 10.0));
        selector.update(Point::new(5.0, 5.0));
        let rect = selector.end(Point::new(5.0, 5.0));
        assert_eq!(rect, Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(selector.state(), SelectionState::Idle);
        assert_eq!(selector.rect(), None);
    }

    #[test]
    fn test_begin_while_selecting_is_ignored() {
        let mut selector = RegionSelector::new();
        selector.begin(Point::new(0.0, 0.0));
        selector.update(Point::new(10.0, 10.0));
        selector.begin(Point::new(100.0, 100.0));
        let rect = selector.end(Point::new(10.0, 10.0));
        assert_eq!(rect, Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_cancel_discards_selection() {
        let mut selector = RegionSelector::new();
        selector.begin(Point::new(0.0, 0.0));
        selector.update(Point::new(50.0, 50.0));
        selector.cancel();
        assert_eq!(selector.state(), SelectionState::Idle);
        assert_eq!(selector.rect(), None);
        assert_eq!(selector.end(Point::new(50.0, 50.0)), None);
    }

    #[test]
    fn test_update_and_end_are_noops_while_idle() {
        let mut selector = RegionSelector::new();
        selector.update(Point::new(5.0, 5.0));
        assert_eq!(selector.state(), SelectionState::Idle);
        assert_eq!(selector.end(Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_begin_starts_with_zero_size_rect() {
        let mut selector = RegionSelector::new();
        selector.begin(Point::new(7.0, 9.0));
        assert_eq!(selector.rect(), Some(Rect::new(7.0, 9.0, 0.0, 0.0)));
    }

    #[test]
    fn test_size_label_tracks_live_rect() {
        let mut selector = RegionSelector::new();
        assert_eq!(selector.size_label(), None);
        selector.begin(Point::new(0.0, 0.0));
        selector.update(Point::new(120.7, 45.2));
        assert_eq!(selector.size_label(), Some("120x45".to_string()));
    }
}
