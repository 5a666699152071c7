use crate::*;

use alloc::rc::Rc;
use core::cell::Cell;
use recycle_view::{
    Axis, ContentAnchor, FlowLayout, ItemPool, ItemWidget, Rect, RecycleView, RecycleViewOptions,
    Size, Viewport,
};

#[derive(Debug, Default)]
struct Row {
    rect: Rect,
    index: Option<usize>,
}

impl ItemWidget for Row {
    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

fn controller(flow: FlowLayout, count: usize, viewport: Size) -> Controller<Row> {
    let options = RecycleViewOptions::new(flow, Size::new(100.0, 50.0)).with_pool_size(8);
    let mut view = RecycleView::new(HeadlessViewport::new(viewport), options)
        .with_item_pool(|warm| ItemPool::new(warm, Row::default));
    view.set_count_provider(move || Ok(count));
    view.set_populate_callback(|i, row: &mut Row| {
        row.index = Some(i);
        Ok(())
    });
    view.request_full_update(true);
    Controller::new(view)
}

#[test]
fn headless_viewport_clamps_scroll_offset() {
    let mut vp = HeadlessViewport::new(Size::new(300.0, 300.0));
    vp.reset_content(Axis::Vertical, ContentAnchor::TopLeft);
    vp.set_content_size(Size::new(300.0, 1000.0));

    assert_eq!(vp.max_scroll_offset(), 700.0);
    assert_eq!(vp.scroll_by(-10.0), 0.0);
    assert_eq!(vp.scroll_by(250.0), 250.0);
    assert_eq!(vp.content_offset().y, 250.0);
    assert_eq!(vp.set_scroll_offset(5000.0), 700.0);
    assert_eq!(vp.normalized_position(), 0.0);

    vp.set_normalized_position(Axis::Vertical, 1.0);
    assert_eq!(vp.scroll_offset(), 0.0);
    // Wrong axis is ignored.
    vp.set_normalized_position(Axis::Horizontal, 1.0);
    assert_eq!(vp.scroll_offset(), 0.0);

    // Shrinking the content pulls the offset back in range.
    vp.set_scroll_offset(600.0);
    vp.set_content_size(Size::new(300.0, 500.0));
    assert_eq!(vp.scroll_offset(), 200.0);
}

#[test]
fn headless_viewport_bottom_anchor_keeps_bottom_distance() {
    let mut vp = HeadlessViewport::new(Size::new(300.0, 300.0));
    vp.reset_content(Axis::Vertical, ContentAnchor::BottomLeft);
    vp.set_content_size(Size::new(300.0, 1000.0));

    // Offset 0 shows the bottom edge.
    assert_eq!(vp.content_offset().y, 0.0);
    assert_eq!(vp.scroll_offset(), 700.0);
    assert_eq!(vp.normalized_position(), 0.0);

    vp.set_normalized_position(Axis::Vertical, 1.0);
    assert_eq!(vp.content_offset().y, -700.0);
    assert_eq!(vp.scroll_offset(), 0.0);

    vp.set_scroll_offset(650.0);
    vp.set_content_size(Size::new(300.0, 1200.0));
    assert_eq!(vp.content_offset().y, -50.0);
    assert_eq!(vp.scroll_offset(), 850.0);
}

#[test]
fn headless_viewport_horizontal() {
    let mut vp = HeadlessViewport::new(Size::new(300.0, 50.0));
    vp.reset_content(Axis::Horizontal, ContentAnchor::TopLeft);
    vp.set_content_size(Size::new(1300.0, 50.0));

    vp.set_normalized_position(Axis::Horizontal, 0.5);
    assert_eq!(vp.scroll_offset(), 500.0);
    assert_eq!(vp.content_offset().x, -500.0);
    assert_eq!(vp.normalized_position(), 0.5);
}

#[test]
fn controller_scroll_steps_the_view() {
    let mut c = controller(FlowLayout::Vertical, 100, Size::new(300.0, 300.0));
    assert_eq!(c.view().visible_range(), Some(0..=6));

    assert_eq!(c.on_scroll(120.0), 120.0);
    assert_eq!(c.view().visible_range(), Some(2..=8));
    assert!(
        c.view()
            .visible_indices()
            .all(|i| c.view().widget(i).and_then(|r| r.index) == Some(i))
    );

    assert_eq!(c.on_scroll(-1000.0), 0.0);
    assert_eq!(c.view().visible_range(), Some(0..=6));
}

#[test]
fn controller_tween_drives_scroll_offset() {
    let mut c = controller(FlowLayout::Vertical, 1000, Size::new(300.0, 300.0));

    let to = c
        .start_tween_to_index(500, 0, 100, Easing::SmoothStep)
        .unwrap();
    assert!((to - 25_000.0).abs() < 0.5, "to {to}");
    assert!(c.is_animating());

    let mut last = 0.0f32;
    for now_ms in [0u64, 10, 20, 40, 80, 100, 120] {
        if let Some(off) = c.tick(now_ms) {
            assert!(off >= last);
            last = off;
        }
    }
    assert!(!c.is_animating());
    assert_eq!(c.scroll_offset(), to);
    assert!(c.view().visible_indices().any(|i| i == 500));
}

#[test]
fn user_scroll_cancels_tween() {
    let mut c = controller(FlowLayout::Vertical, 1000, Size::new(300.0, 300.0));
    c.start_tween_to_offset(10_000.0, 0, 100, Easing::Linear);
    let mid = c.tick(50).unwrap();
    assert!((mid - 5_000.0).abs() < 0.5);

    c.on_scroll(10.0);
    assert!(!c.is_animating());
    assert_eq!(c.tick(60), None);
    assert!((c.scroll_offset() - (mid + 10.0)).abs() < 0.5);
}

#[test]
fn tick_runs_deferred_updates() {
    let count = Rc::new(Cell::new(3usize));
    let options = RecycleViewOptions::new(FlowLayout::Vertical, Size::new(100.0, 50.0));
    let mut view = RecycleView::new(HeadlessViewport::new(Size::new(300.0, 300.0)), options)
        .with_item_pool(|warm| ItemPool::new(warm, Row::default));
    let n = count.clone();
    view.set_count_provider(move || Ok(n.get()));
    let mut c = Controller::new(view);

    c.view_mut().request_full_update(false);
    assert_eq!(c.view().visible_count(), 0);
    assert_eq!(c.tick(0), None);
    assert_eq!(c.view().visible_range(), Some(0..=2));

    count.set(40);
    c.view_mut().request_incremental_update(false);
    c.tick(16);
    assert_eq!(c.view().visible_range(), Some(0..=6));
    assert_eq!(c.view().viewport().content_size().height, 2000.0);
}

#[test]
fn viewport_resize_is_picked_up_on_tick() {
    let mut c = controller(FlowLayout::Vertical, 100, Size::new(300.0, 300.0));
    c.on_viewport_size(Size::new(300.0, 500.0));
    c.tick(0);
    assert_eq!(c.view().visible_range(), Some(0..=10));
}

#[test]
fn bottom_up_controller_starts_at_the_end() {
    let mut c = controller(FlowLayout::VerticalBottomUp, 20, Size::new(300.0, 300.0));
    assert_eq!(c.view().viewport().anchor(), ContentAnchor::BottomLeft);
    assert_eq!(c.scroll_offset(), 700.0);
    assert_eq!(c.view().visible_range(), Some(13..=19));

    assert_eq!(c.scroll_to_index(0), 0.0);
    assert_eq!(c.view().visible_range(), Some(0..=6));
}

#[test]
fn horizontal_controller_scrolls_to_index() {
    let mut c = controller(FlowLayout::Horizontal, 30, Size::new(300.0, 50.0));
    assert_eq!(c.view().viewport().axis(), Axis::Horizontal);
    let offset = c.scroll_to_index(10);
    assert!((offset - 1000.0).abs() < 0.5);
    assert!(c.view().visible_indices().any(|i| i == 10));
}

#[test]
fn tween_samples_and_retargets() {
    let mut t = Tween::new(0.0, 100.0, 0, 100, Easing::Linear);
    assert_eq!(t.sample(50), 50.0);
    assert_eq!(t.sample(500), 100.0);
    assert!(t.is_done(100));

    t.retarget(50, 0.0, 50);
    assert_eq!(t.from, 50.0);
    assert_eq!(t.sample(75), 25.0);

    for easing in [
        Easing::Linear,
        Easing::SmoothStep,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
    ] {
        assert_eq!(easing.sample(0.0), 0.0);
        assert_eq!(easing.sample(1.0), 1.0);
    }
}
