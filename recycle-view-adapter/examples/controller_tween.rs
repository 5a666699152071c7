use recycle_view::{FlowLayout, ItemPool, ItemWidget, Rect, RecycleView, RecycleViewOptions, Size};
use recycle_view_adapter::{Controller, Easing, HeadlessViewport};

#[derive(Default)]
struct Row {
    rect: Rect,
}

impl ItemWidget for Row {
    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

fn main() {
    // Example: controller driving tween scrolling without holding any UI objects.
    //
    // An adapter would:
    // - start a tween (e.g. in response to a "scroll to index" command)
    // - call tick(now_ms) in a frame loop / timer
    // - apply the returned offset to the real scroll container (if any)
    // - render the widgets the view holds
    let options = RecycleViewOptions::new(FlowLayout::Vertical, Size::new(400.0, 24.0))
        .with_pool_size(32);
    let mut view = RecycleView::new(HeadlessViewport::new(Size::new(400.0, 480.0)), options)
        .with_item_pool(|warm| ItemPool::new(warm, Row::default));
    view.set_count_provider(|| Ok(10_000));
    view.request_full_update(false);

    let mut c = Controller::new(view);
    // The first tick runs the deferred update.
    c.tick(0);

    let target = c.start_tween_to_index(2_000, 0, 240, Easing::SmoothStep);
    println!("target_offset={target:?}");

    let mut now_ms = 0u64;
    loop {
        now_ms += 16;
        if let Some(off) = c.tick(now_ms) {
            if now_ms.is_multiple_of(80) {
                println!("t={now_ms} off={off} visible={:?}", c.view().visible_range());
            }
        } else {
            break;
        }
    }

    println!(
        "done: off={} range={:?} widgets={}",
        c.scroll_offset(),
        c.view().visible_range(),
        c.view().visible_count()
    );
    if let Some(row) = c.view().visible_range().and_then(|r| c.view().widget(*r.start())) {
        println!("first row rect={:?}", row.rect);
    }
}
