//! Index ↔ normalized scroll position mapping.
//!
//! Only the mapping lives here. Applying a position is the host viewport's job.

use crate::layout::LayoutEngine;
use crate::{Axis, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedPosition {
    pub axis: Axis,
    /// In `[0, 1]`. Vertical: `1` is the top edge. Horizontal: `0` is the left edge.
    pub value: f32,
}

/// Resolves a possibly negative index (counting from the end) and clamps it into range.
///
/// Returns `None` for an empty list.
pub fn resolve_index(index: isize, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let index = if index < 0 {
        index.saturating_add(count as isize)
    } else {
        index
    };
    Some(index.clamp(0, count as isize - 1) as usize)
}

/// The position that brings `rect`'s leading edge to the viewport's leading edge.
pub fn position_for_rect(layout: &LayoutEngine, viewport: Size, rect: Rect) -> NormalizedPosition {
    let content = layout.content_size();
    match layout.flow().scroll_axis() {
        Axis::Vertical => {
            let scrollable = content.height - viewport.height;
            let from_top = distance_from_top(layout, rect);
            let value = if scrollable > 0.0 {
                (1.0 - from_top / scrollable).clamp(0.0, 1.0)
            } else {
                1.0
            };
            NormalizedPosition {
                axis: Axis::Vertical,
                value,
            }
        }
        Axis::Horizontal => {
            let scrollable = content.width - viewport.width;
            let value = if scrollable > 0.0 {
                (rect.left() / scrollable).clamp(0.0, 1.0)
            } else {
                0.0
            };
            NormalizedPosition {
                axis: Axis::Horizontal,
                value,
            }
        }
    }
}

/// Distance along the scroll axis from the content's leading edge to the viewport's leading
/// edge at `value`.
pub fn offset_for_position(layout: &LayoutEngine, viewport: Size, value: f32) -> f32 {
    let content = layout.content_size();
    let value = value.clamp(0.0, 1.0);
    match layout.flow().scroll_axis() {
        Axis::Vertical => (1.0 - value) * (content.height - viewport.height).max(0.0),
        Axis::Horizontal => value * (content.width - viewport.width).max(0.0),
    }
}

/// How far below the content's top edge `rect` starts.
pub(crate) fn distance_from_top(layout: &LayoutEngine, rect: Rect) -> f32 {
    if layout.flow().is_bottom_up() {
        layout.content_size().height - rect.top()
    } else {
        -rect.top()
    }
}

/// The item at the viewport's leading edge for `offset` (see [`offset_for_position`]): the last
/// one starting at or before it.
///
/// Expects every rect in range to be clean. Items sharing a line resolve to the line's first
/// item.
pub(crate) fn index_at_offset(layout: &LayoutEngine, offset: f32) -> Option<usize> {
    let count = layout.count();
    if count == 0 {
        return None;
    }
    let axis = layout.flow().scroll_axis();
    let lead = |index: usize| {
        let rect = layout.slot(index).map(|s| s.rect).unwrap_or_default();
        match axis {
            Axis::Vertical => distance_from_top(layout, rect),
            Axis::Horizontal => rect.left(),
        }
    };

    let (mut lo, mut hi) = (0usize, count);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if lead(mid) <= offset {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    let mut index = lo.saturating_sub(1);
    while index > 0 && lead(index - 1) == lead(index) {
        index -= 1;
    }
    Some(index)
}
