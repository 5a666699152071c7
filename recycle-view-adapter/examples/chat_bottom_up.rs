use std::cell::RefCell;
use std::rc::Rc;

use recycle_view::{FlowLayout, ItemPool, ItemWidget, Rect, RecycleView, RecycleViewOptions, Size};
use recycle_view_adapter::{Controller, HeadlessViewport};

#[derive(Default)]
struct Bubble {
    rect: Rect,
    text: String,
}

impl ItemWidget for Bubble {
    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

fn main() {
    // Example: a chat log anchored to the bottom. New messages arrive at the end and the view
    // keeps showing the newest one.
    let messages = Rc::new(RefCell::new(
        (0..30).map(|i| format!("message {i}")).collect::<Vec<_>>(),
    ));

    let options = RecycleViewOptions::new(FlowLayout::VerticalBottomUp, Size::new(360.0, 48.0))
        .with_pool_size(16);
    let mut view = RecycleView::new(HeadlessViewport::new(Size::new(360.0, 400.0)), options)
        .with_item_pool(|warm| ItemPool::new(warm, Bubble::default));

    let m = messages.clone();
    view.set_count_provider(move || Ok(m.borrow().len()));
    let m = messages.clone();
    view.set_size_provider(move |i| {
        let lines = 1 + m.borrow()[i].len() / 24;
        Ok(Size::new(360.0, 24.0 * lines as f32 + 8.0))
    });
    let m = messages.clone();
    view.set_populate_callback(move |i, bubble: &mut Bubble| {
        bubble.text.clone_from(&m.borrow()[i]);
        Ok(())
    });
    view.request_full_update(true);

    let mut c = Controller::new(view);
    println!(
        "initial: offset={} visible={:?}",
        c.scroll_offset(),
        c.view().visible_range()
    );

    messages
        .borrow_mut()
        .push("a much longer message that wraps onto a second line".to_string());
    c.view_mut().request_full_update(false);
    c.tick(16);
    let newest = c.view().visible_range().map(|r| *r.end());
    println!("after new message: visible={:?}", c.view().visible_range());
    if let Some(bubble) = newest.and_then(|i| c.view().widget(i)) {
        println!("newest: {:?} at {:?}", bubble.text, bubble.rect);
    }

    c.scroll_to_index(0);
    println!("oldest: offset={} visible={:?}", c.scroll_offset(), c.view().visible_range());
}
