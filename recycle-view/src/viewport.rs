use crate::{Axis, ContentAnchor, Point, Size};

/// The host scroll container, seen from the view.
///
/// The view never scrolls anything itself. It reads the viewport size and the content offset,
/// reports the content size it computed, and asks for normalized positions when scrolling to
/// an index.
pub trait Viewport {
    /// Size of the visible area.
    fn size(&self) -> Size;

    /// Position of the content relative to its anchor corner, in viewport units.
    ///
    /// Top-anchored content moves up (positive `y`) as the user scrolls toward later items;
    /// horizontal content moves left (negative `x`). Bottom-anchored content sits at `y = 0`
    /// when its bottom edge is visible and moves down (negative `y`) toward earlier items.
    fn content_offset(&self) -> Point;

    fn set_content_size(&mut self, size: Size);

    /// Scrolls to `value` in `[0, 1]` along `axis`.
    ///
    /// Vertical: `1` shows the top edge, `0` the bottom edge. Horizontal: `0` shows the left
    /// edge, `1` the right edge.
    fn set_normalized_position(&mut self, axis: Axis, value: f32);

    /// Whether the host is currently rendering. Updates requested while inactive stay pending.
    fn is_active(&self) -> bool {
        true
    }

    /// Prepares the content for a flow: scroll only along `axis`, pin the content to `anchor`
    /// and move it back to its origin.
    fn reset_content(&mut self, axis: Axis, anchor: ContentAnchor) {
        let _ = (axis, anchor);
    }
}
