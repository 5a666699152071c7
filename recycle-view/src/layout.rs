use alloc::vec::Vec;

use crate::{FlowLayout, Padding, Point, Rect, RecycleViewOptions, Size, Spacing};

/// Items whose leading edges differ by less than this share a line.
const LINE_EPSILON: f32 = 1e-3;

/// Geometry half of a managed item.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutSlot {
    pub rect: Rect,
    /// `true` until `rect` has been computed since the last invalidation.
    pub dirty: bool,
}

impl Default for LayoutSlot {
    fn default() -> Self {
        Self {
            rect: Rect::default(),
            dirty: true,
        }
    }
}

/// Where the next item goes.
#[derive(Clone, Copy, Debug)]
struct Cursor {
    /// Left-top corner of the next item.
    pos: Point,
    /// Largest cross extent seen on the current line (wrapping flows only).
    line_extent: f32,
}

/// Lazily computes item rectangles for one of the [`FlowLayout`] policies.
///
/// Rects live in content-local space with `y` growing upward: top-anchored flows place items at
/// negative `y` below the content's top edge, bottom-up places them above the content's bottom
/// edge. Slots beyond `count` are kept around (dirty) after the data shrinks so they can be
/// reused when it grows again.
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    flow: FlowLayout,
    padding: Padding,
    spacing: Spacing,
    viewport: Size,
    slots: Vec<LayoutSlot>,
    count: usize,
    content_size: Size,
}

impl LayoutEngine {
    pub fn new(options: &RecycleViewOptions) -> Self {
        Self {
            flow: options.flow,
            padding: options.padding,
            spacing: options.spacing,
            viewport: Size::default(),
            slots: Vec::new(),
            count: 0,
            content_size: Size::default(),
        }
    }

    /// Applies new layout options. All rects become dirty.
    pub fn configure(&mut self, options: &RecycleViewOptions) {
        self.flow = options.flow;
        self.padding = options.padding;
        self.spacing = options.spacing;
        self.mark_all_dirty();
    }

    pub fn set_viewport_size(&mut self, viewport: Size) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        // Wrapping flows and the extent of every flow depend on the viewport.
        self.mark_all_dirty();
    }

    pub fn flow(&self) -> FlowLayout {
        self.flow
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Raw slot access, dirty or not.
    pub fn slot(&self, index: usize) -> Option<&LayoutSlot> {
        if index >= self.count {
            return None;
        }
        self.slots.get(index)
    }

    /// Number of slots held, including the retained tail beyond `count`.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_dirty(&self, index: usize) -> Option<bool> {
        self.slots.get(index).map(|s| s.dirty)
    }

    pub fn mark_all_dirty(&mut self) {
        for slot in &mut self.slots {
            slot.dirty = true;
        }
    }

    /// Adapts the slot list to a new data count.
    ///
    /// With `keep_old_items`, rects that stay valid are kept clean; only the trailing item is
    /// invalidated on shrink so the end of the content is re-derived. Slots past `new_count`
    /// are retained but dirty.
    pub fn resize(&mut self, new_count: usize, keep_old_items: bool) {
        vdebug!(
            from = self.count,
            to = new_count,
            keep_old_items,
            "LayoutEngine::resize"
        );
        let held = self.slots.len();
        if held < new_count {
            if !keep_old_items {
                self.mark_all_dirty();
            }
            self.slots.resize(new_count, LayoutSlot::default());
        } else if held > new_count {
            for (i, slot) in self.slots[..new_count].iter_mut().enumerate() {
                if !keep_old_items || i + 1 == new_count {
                    slot.dirty = true;
                }
            }
            for slot in &mut self.slots[new_count..] {
                slot.dirty = true;
            }
        } else if !keep_old_items {
            self.mark_all_dirty();
        }
        self.count = new_count;
    }

    /// Makes sure `index` has a clean rect and returns it.
    ///
    /// Walks forward from the nearest clean predecessor; clean rects are never recomputed.
    /// Returns `None` when `index` is out of range.
    pub fn ensure_rect(
        &mut self,
        index: usize,
        sizes: &mut dyn FnMut(usize) -> Size,
    ) -> Option<Rect> {
        if index >= self.count {
            vwarn!(index, count = self.count, "ensure_rect: index out of bounds");
            return None;
        }
        if !self.slots[index].dirty {
            return Some(self.slots[index].rect);
        }

        if self.slots[0].dirty {
            let mut cursor = self.origin();
            let rect = self.place(&mut cursor, sizes(0));
            self.slots[0] = LayoutSlot { rect, dirty: false };
            if index == 0 {
                return Some(rect);
            }
        }

        let nearest_clean = (0..index)
            .rev()
            .find(|&i| !self.slots[i].dirty)
            .unwrap_or(0);
        vtrace!(index, nearest_clean, "ensure_rect: walking forward");

        let mut cursor = self.resume_after(nearest_clean);
        for i in nearest_clean + 1..=index {
            let rect = self.place(&mut cursor, sizes(i));
            self.slots[i] = LayoutSlot { rect, dirty: false };
        }
        Some(self.slots[index].rect)
    }

    /// Lays out every item from scratch and recomputes the content extent.
    pub fn recompute_all(&mut self, sizes: &mut dyn FnMut(usize) -> Size) {
        let measured: Vec<Size> = (0..self.count).map(|i| sizes(i)).collect();

        if self.flow.is_bottom_up() {
            let mut total = self.padding.top + self.padding.bottom;
            if !measured.is_empty() {
                total += measured.iter().map(|s| s.height).sum::<f32>();
                total += (measured.len() - 1) as f32 * self.spacing.y;
            }
            self.content_size.height = total;
        }

        let mut cursor = self.origin();
        for (i, size) in measured.iter().enumerate() {
            let rect = self.place(&mut cursor, *size);
            self.slots[i] = LayoutSlot { rect, dirty: false };
        }

        self.content_size = self.extent();
        vdebug!(
            count = self.count,
            width = self.content_size.width,
            height = self.content_size.height,
            "LayoutEngine::recompute_all"
        );
    }

    /// Incremental counterpart of [`Self::recompute_all`].
    ///
    /// Only dirty items are measured; the extent is derived from the clean rects. Bottom-up
    /// flows anchor every item to the total height, so they always recompute from scratch.
    pub fn recompute_partial(&mut self, sizes: &mut dyn FnMut(usize) -> Size) {
        if self.flow.is_bottom_up() || self.count == 0 {
            self.recompute_all(sizes);
            return;
        }
        self.ensure_rect(self.count - 1, sizes);
        self.content_size = self.extent();
        vdebug!(
            count = self.count,
            width = self.content_size.width,
            height = self.content_size.height,
            "LayoutEngine::recompute_partial"
        );
    }

    /// Content extent from the current (clean) rects.
    fn extent(&self) -> Size {
        let rects = self.slots[..self.count].iter().map(|s| s.rect);
        let (width, height) = match self.flow {
            FlowLayout::Vertical | FlowLayout::HorizontalThenVertical => {
                let min_bottom = rects.map(|r| r.bottom()).fold(f32::INFINITY, f32::min);
                (self.viewport.width, -min_bottom + self.padding.bottom)
            }
            FlowLayout::Horizontal | FlowLayout::VerticalThenHorizontal => {
                let max_right = rects.map(|r| r.right()).fold(f32::NEG_INFINITY, f32::max);
                (max_right + self.padding.right, self.viewport.height)
            }
            FlowLayout::VerticalBottomUp => (self.viewport.width, self.content_size.height),
        };
        Size::new(width.max(0.0), height.max(0.0))
    }

    fn origin(&self) -> Cursor {
        let y = if self.flow.is_bottom_up() {
            self.content_size.height - self.padding.top
        } else {
            -self.padding.top
        };
        Cursor {
            pos: Point::new(self.padding.left, y),
            line_extent: 0.0,
        }
    }

    /// Rebuilds the cursor as it was right after placing `index`.
    fn resume_after(&self, index: usize) -> Cursor {
        let rect = self.slots[index].rect;
        let same_line = |other: &Rect| match self.flow {
            FlowLayout::HorizontalThenVertical => (other.top() - rect.top()).abs() < LINE_EPSILON,
            FlowLayout::VerticalThenHorizontal => other.left() == rect.left(),
            _ => false,
        };
        let line = self.slots[..=index]
            .iter()
            .rev()
            .take_while(|s| !s.dirty && (s.rect == rect || same_line(&s.rect)));

        match self.flow {
            FlowLayout::Vertical | FlowLayout::VerticalBottomUp => Cursor {
                pos: Point::new(rect.left(), rect.bottom() - self.spacing.y),
                line_extent: 0.0,
            },
            FlowLayout::Horizontal => Cursor {
                pos: Point::new(rect.right() + self.spacing.x, rect.top()),
                line_extent: 0.0,
            },
            FlowLayout::HorizontalThenVertical => Cursor {
                pos: Point::new(rect.right() + self.spacing.x, rect.top()),
                line_extent: line.map(|s| s.rect.height).fold(0.0, f32::max),
            },
            FlowLayout::VerticalThenHorizontal => Cursor {
                pos: Point::new(rect.left(), rect.bottom() - self.spacing.y),
                line_extent: line.map(|s| s.rect.width).fold(0.0, f32::max),
            },
        }
    }

    /// Places one item at the cursor (wrapping first if it would not fit) and advances.
    fn place(&self, cursor: &mut Cursor, size: Size) -> Rect {
        match self.flow {
            FlowLayout::Vertical | FlowLayout::VerticalBottomUp => {
                let rect = Rect::from_left_top(cursor.pos, size);
                cursor.pos.y -= size.height + self.spacing.y;
                rect
            }
            FlowLayout::Horizontal => {
                let rect = Rect::from_left_top(cursor.pos, size);
                cursor.pos.x += size.width + self.spacing.x;
                rect
            }
            FlowLayout::HorizontalThenVertical => {
                let line_started = cursor.pos.x > self.padding.left;
                let limit = self.viewport.width - self.padding.right;
                if line_started && cursor.pos.x + size.width > limit {
                    cursor.pos.x = self.padding.left;
                    cursor.pos.y -= cursor.line_extent + self.spacing.y;
                    cursor.line_extent = 0.0;
                }
                let rect = Rect::from_left_top(cursor.pos, size);
                cursor.line_extent = cursor.line_extent.max(size.height);
                cursor.pos.x += size.width + self.spacing.x;
                rect
            }
            FlowLayout::VerticalThenHorizontal => {
                let top = -self.padding.top;
                let line_started = cursor.pos.y < top;
                let limit = -self.viewport.height + self.padding.bottom;
                if line_started && cursor.pos.y - size.height < limit {
                    cursor.pos.y = top;
                    cursor.pos.x += cursor.line_extent + self.spacing.x;
                    cursor.line_extent = 0.0;
                }
                let rect = Rect::from_left_top(cursor.pos, size);
                cursor.line_extent = cursor.line_extent.max(size.width);
                cursor.pos.y -= size.height + self.spacing.y;
                rect
            }
        }
    }
}
