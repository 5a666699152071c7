use alloc::vec::Vec;
use core::ops::RangeInclusive;

use crate::binder::DataBinder;
use crate::layout::LayoutEngine;
use crate::pool::WidgetRecycler;
use crate::{Diagnostic, Rect};

/// Something that can be placed inside the content at an item's rect.
pub trait ItemWidget {
    /// `rect` is in content-local space, left-bottom origin, `y` up.
    fn set_rect(&mut self, rect: Rect);
}

/// The four boundary indices of the visible run.
///
/// `up_to_hide..=down_to_hide` is the visible run; `up_to_show`/`down_to_show` are the next
/// candidates just outside it. The hide bounds are `-1` when nothing is visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriticalIndices {
    pub up_to_hide: isize,
    pub down_to_hide: isize,
    pub up_to_show: isize,
    pub down_to_show: isize,
}

impl CriticalIndices {
    /// Seeds the stable configuration around a visible run.
    pub fn around(first: Option<usize>, last: Option<usize>, count: usize) -> Self {
        let first = first.map_or(-1, |i| i as isize);
        let last = last.map_or(-1, |i| i as isize);
        let max = count as isize - 1;
        Self {
            up_to_hide: first,
            down_to_hide: last,
            up_to_show: (first - 1).max(0),
            down_to_show: (last + 1).min(max).max(0),
        }
    }

    /// Whether the hide bounds or the show bounds have passed each other.
    pub fn is_crossed(&self) -> bool {
        self.up_to_hide > self.down_to_hide || self.up_to_show >= self.down_to_show
    }

    /// The visible run, if any.
    pub fn visible_range(&self) -> Option<RangeInclusive<usize>> {
        if self.up_to_hide < 0 || self.up_to_hide > self.down_to_hide {
            return None;
        }
        Some(self.up_to_hide as usize..=self.down_to_hide as usize)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Transition {
    Idle,
    Moved,
    /// The indices crossed and a full reset already ran.
    Reset,
}

/// Everything a window update borrows from the view.
pub(crate) struct WindowContext<'a, W> {
    pub layout: &'a mut LayoutEngine,
    pub binder: &'a mut DataBinder<W>,
    pub recycler: Option<&'a mut dyn WidgetRecycler<W>>,
    /// The viewport rect in content space, already translated by the content offset.
    pub view_rect: Rect,
}

impl<W> WindowContext<'_, W> {
    fn should_be_visible(&mut self, index: usize) -> bool {
        let binder = &mut *self.binder;
        match self
            .layout
            .ensure_rect(index, &mut |i| binder.item_size(i))
        {
            Some(rect) => rect.overlaps(&self.view_rect),
            None => false,
        }
    }

    fn acquire(&mut self, index: usize) -> Option<W> {
        let result = match self.recycler.as_deref_mut() {
            Some(recycler) => recycler.acquire(index),
            None => Err(Diagnostic::NoWidgetSource { index }),
        };
        match result {
            Ok(widget) => Some(widget),
            Err(diagnostic) => {
                self.binder.report(diagnostic);
                None
            }
        }
    }

    pub(crate) fn release(&mut self, widget: W) {
        let Some(recycler) = self.recycler.as_deref_mut() else {
            return;
        };
        if let Err(diagnostic) = recycler.release(widget) {
            self.binder.report(diagnostic);
        }
    }
}

impl<W: ItemWidget> WindowContext<'_, W> {
    /// Positions `widget` at `index`'s rect, then populates it.
    fn bind(&mut self, index: usize, widget: &mut W) {
        let binder = &mut *self.binder;
        if let Some(rect) = self
            .layout
            .ensure_rect(index, &mut |i| binder.item_size(i))
        {
            widget.set_rect(rect);
        }
        self.binder.populate(index, widget);
    }
}

/// Tracks which items hold a widget and keeps that set equal to the items on screen.
///
/// The common path is [`Self::step_update`], which only looks at the four critical indices.
/// [`Self::full_reset`] is the O(n) fallback for jumps, data changes and config changes.
///
/// The run between the hide bounds is contiguous. In the wrapping flows an item shorter than
/// its row (or narrower than its column) can leave the viewport while both neighbours stay on
/// screen; stepping keeps its widget until the run edge passes it, and only a full reset
/// releases it.
#[derive(Debug)]
pub struct VisibilityWindow<W> {
    widgets: Vec<Option<W>>,
    critical: CriticalIndices,
    count: usize,
}

impl<W> Default for VisibilityWindow<W> {
    fn default() -> Self {
        Self {
            widgets: Vec::new(),
            critical: CriticalIndices::default(),
            count: 0,
        }
    }
}

impl<W> VisibilityWindow<W> {
    pub fn critical_indices(&self) -> CriticalIndices {
        self.critical
    }

    pub fn widget(&self, index: usize) -> Option<&W> {
        if index >= self.count {
            return None;
        }
        self.widgets.get(index)?.as_ref()
    }

    pub fn widget_mut(&mut self, index: usize) -> Option<&mut W> {
        if index >= self.count {
            return None;
        }
        self.widgets.get_mut(index)?.as_mut()
    }

    /// Indices that currently hold a widget, ascending.
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.widgets[..self.count]
            .iter()
            .enumerate()
            .filter_map(|(i, w)| w.as_ref().map(|_| i))
    }

    pub fn visible_count(&self) -> usize {
        self.widgets.iter().filter(|w| w.is_some()).count()
    }

    /// Follows a data-count change: releases widgets past `new_count`.
    pub(crate) fn resize(&mut self, new_count: usize, ctx: &mut WindowContext<'_, W>) {
        for slot in self.widgets.iter_mut().skip(new_count) {
            if let Some(widget) = slot.take() {
                ctx.release(widget);
            }
        }
        if self.widgets.len() < new_count {
            self.widgets.resize_with(new_count, || None);
        }
        self.count = new_count;
        let max = new_count as isize - 1;
        let c = &mut self.critical;
        for index in [
            &mut c.up_to_hide,
            &mut c.down_to_hide,
            &mut c.up_to_show,
            &mut c.down_to_show,
        ] {
            *index = (*index).min(max);
        }
    }

    /// Hands every held widget back. Used on teardown and when the widget source changes.
    pub(crate) fn release_all(&mut self, ctx: &mut WindowContext<'_, W>) {
        for slot in &mut self.widgets {
            if let Some(widget) = slot.take() {
                ctx.release(widget);
            }
        }
        self.critical = CriticalIndices::around(None, None, self.count);
    }

    fn hide_index(&self, edge: Edge) -> isize {
        match edge {
            Edge::Top => self.critical.up_to_hide,
            Edge::Bottom => self.critical.down_to_hide,
        }
    }

    fn show_index(&self, edge: Edge) -> isize {
        match edge {
            Edge::Top => self.critical.up_to_show,
            Edge::Bottom => self.critical.down_to_show,
        }
    }

    fn in_range(&self, index: isize) -> Option<usize> {
        usize::try_from(index).ok().filter(|&i| i < self.count)
    }
}

impl<W: ItemWidget> VisibilityWindow<W> {
    /// Moves the window incrementally until no boundary item changes state.
    pub(crate) fn step_update(&mut self, ctx: &mut WindowContext<'_, W>) {
        if self.count == 0 {
            return;
        }
        if self.critical.up_to_hide < 0 {
            // Nothing on screen: there is no edge to grow from.
            self.full_reset(ctx);
            return;
        }
        let mut rounds = 0usize;
        loop {
            rounds += 1;
            let mut moved = false;
            for (hide, edge) in [
                (true, Edge::Top),
                (true, Edge::Bottom),
                (false, Edge::Top),
                (false, Edge::Bottom),
            ] {
                let transition = if hide {
                    self.try_hide(ctx, edge)
                } else {
                    self.try_show(ctx, edge)
                };
                match transition {
                    Transition::Idle => {}
                    Transition::Moved => moved = true,
                    Transition::Reset => {
                        vdebug!(rounds, "step_update: indices crossed, full reset");
                        return;
                    }
                }
            }
            if !moved {
                break;
            }
        }
        vtrace!(rounds, critical = ?self.critical, "step_update");
    }

    fn try_hide(&mut self, ctx: &mut WindowContext<'_, W>, edge: Edge) -> Transition {
        let raw = self.hide_index(edge);
        let Some(index) = self.in_range(raw) else {
            return Transition::Idle;
        };
        if self.widgets[index].is_none() || ctx.should_be_visible(index) {
            return Transition::Idle;
        }
        if let Some(widget) = self.widgets[index].take() {
            ctx.release(widget);
        }

        // Left unclamped: hiding the last held item pushes the hide bounds past each other.
        let c = &mut self.critical;
        match edge {
            Edge::Top => {
                c.up_to_show = c.up_to_show.max(raw);
                c.up_to_hide = raw + 1;
            }
            Edge::Bottom => {
                c.down_to_show = c.down_to_show.min(raw);
                c.down_to_hide = raw - 1;
            }
        }
        self.settle(ctx)
    }

    fn try_show(&mut self, ctx: &mut WindowContext<'_, W>, edge: Edge) -> Transition {
        let raw = self.show_index(edge);
        let Some(index) = self.in_range(raw) else {
            return Transition::Idle;
        };
        if self.widgets[index].is_some() || !ctx.should_be_visible(index) {
            return Transition::Idle;
        }
        let Some(mut widget) = ctx.acquire(index) else {
            return Transition::Idle;
        };
        ctx.bind(index, &mut widget);
        self.widgets[index] = Some(widget);

        let max = self.count as isize - 1;
        let c = &mut self.critical;
        match edge {
            Edge::Top => {
                c.up_to_hide = c.up_to_hide.min(raw);
                c.up_to_show = (raw - 1).clamp(0, max);
            }
            Edge::Bottom => {
                c.down_to_hide = c.down_to_hide.max(raw);
                c.down_to_show = (raw + 1).clamp(0, max);
            }
        }

        self.settle(ctx)
    }

    /// Falls back to a full reset once either pair of bounds has crossed.
    fn settle(&mut self, ctx: &mut WindowContext<'_, W>) -> Transition {
        if self.critical.is_crossed() {
            self.full_reset(ctx);
            return Transition::Reset;
        }
        Transition::Moved
    }

    /// Recomputes the whole window from scratch.
    ///
    /// Items that stay visible are bound again so they pick up data and geometry changes.
    pub(crate) fn full_reset(&mut self, ctx: &mut WindowContext<'_, W>) {
        let mut first = None;
        let mut last = None;

        for index in 0..self.count {
            let visible = ctx.should_be_visible(index);
            if visible {
                first.get_or_insert(index);
                last = Some(index);
            }
            match (self.widgets[index].take(), visible) {
                (Some(mut widget), true) => {
                    ctx.bind(index, &mut widget);
                    self.widgets[index] = Some(widget);
                }
                (Some(widget), false) => ctx.release(widget),
                (None, true) => {
                    if let Some(mut widget) = ctx.acquire(index) {
                        ctx.bind(index, &mut widget);
                        self.widgets[index] = Some(widget);
                    }
                }
                (None, false) => {}
            }
        }

        self.critical = CriticalIndices::around(first, last, self.count);
        vdebug!(
            count = self.count,
            first = ?first,
            last = ?last,
            "VisibilityWindow::full_reset"
        );
    }
}
