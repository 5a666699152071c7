use recycle_view::{Axis, ContentAnchor, Point, Size, Viewport};

/// A [`Viewport`] without a UI behind it.
///
/// Keeps the content offset in the same convention a real scroll container would, clamped to
/// the scrollable range, and exposes it as a plain scroll offset: the distance from the
/// content's leading edge (top, or left for horizontal flows) to the viewport's leading edge.
///
/// Useful for tests, simulations and for adapters that own the scroll position themselves and
/// only need to mirror it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadlessViewport {
    size: Size,
    content: Size,
    offset: Point,
    axis: Axis,
    anchor: ContentAnchor,
    active: bool,
}

impl HeadlessViewport {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            content: Size::default(),
            offset: Point::default(),
            axis: Axis::Vertical,
            anchor: ContentAnchor::TopLeft,
            active: true,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn anchor(&self) -> ContentAnchor {
        self.anchor
    }

    pub fn content_size(&self) -> Size {
        self.content
    }

    /// Resizes the visible area. Follow up with `RecycleView::on_viewport_resized`.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.clamp();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Largest valid scroll offset along the scroll axis.
    pub fn max_scroll_offset(&self) -> f32 {
        match self.axis {
            Axis::Vertical => (self.content.height - self.size.height).max(0.0),
            Axis::Horizontal => (self.content.width - self.size.width).max(0.0),
        }
    }

    /// Distance from the content's leading edge to the viewport's leading edge.
    pub fn scroll_offset(&self) -> f32 {
        match (self.axis, self.anchor) {
            (Axis::Vertical, ContentAnchor::TopLeft) => self.offset.y,
            (Axis::Vertical, ContentAnchor::BottomLeft) => self.max_scroll_offset() + self.offset.y,
            (Axis::Horizontal, _) => -self.offset.x,
        }
    }

    /// Moves to `offset` (clamped) and returns the applied value.
    pub fn set_scroll_offset(&mut self, offset: f32) -> f32 {
        let max = self.max_scroll_offset();
        let offset = offset.clamp(0.0, max);
        match (self.axis, self.anchor) {
            (Axis::Vertical, ContentAnchor::TopLeft) => self.offset.y = offset,
            (Axis::Vertical, ContentAnchor::BottomLeft) => self.offset.y = offset - max,
            (Axis::Horizontal, _) => self.offset.x = -offset,
        }
        offset
    }

    /// Scrolls by `delta` toward later items (negative: toward earlier ones).
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        self.set_scroll_offset(self.scroll_offset() + delta)
    }

    /// The current position in the `[0, 1]` convention of [`Viewport::set_normalized_position`].
    pub fn normalized_position(&self) -> f32 {
        let max = self.max_scroll_offset();
        if max <= 0.0 {
            return match self.axis {
                Axis::Vertical => 1.0,
                Axis::Horizontal => 0.0,
            };
        }
        let t = self.scroll_offset() / max;
        match self.axis {
            Axis::Vertical => 1.0 - t,
            Axis::Horizontal => t,
        }
    }

    fn clamp(&mut self) {
        let offset = self.scroll_offset();
        self.set_scroll_offset(offset);
    }
}

impl Viewport for HeadlessViewport {
    fn size(&self) -> Size {
        self.size
    }

    fn content_offset(&self) -> Point {
        self.offset
    }

    fn set_content_size(&mut self, size: Size) {
        // Bottom-anchored content keeps its distance from the bottom edge.
        let from_bottom = self.offset.y;
        self.content = size;
        match self.anchor {
            ContentAnchor::BottomLeft if self.axis == Axis::Vertical => {
                self.offset.y = from_bottom.clamp(-self.max_scroll_offset(), 0.0);
            }
            _ => self.clamp(),
        }
    }

    fn set_normalized_position(&mut self, axis: Axis, value: f32) {
        if axis != self.axis {
            return;
        }
        let value = value.clamp(0.0, 1.0);
        let max = self.max_scroll_offset();
        let offset = match axis {
            Axis::Vertical => (1.0 - value) * max,
            Axis::Horizontal => value * max,
        };
        self.set_scroll_offset(offset);
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn reset_content(&mut self, axis: Axis, anchor: ContentAnchor) {
        self.axis = axis;
        self.anchor = anchor;
        self.offset = Point::default();
    }
}
