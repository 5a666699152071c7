// Example: a vertical list of 10k rows over a minimal host viewport.
use recycle_view::{
    Axis, ContentAnchor, FlowLayout, ItemPool, ItemWidget, Point, Rect, RecycleView,
    RecycleViewOptions, Size, Viewport,
};

/// Stands in for a UI scroll container. Top-anchored, vertical only.
struct Host {
    size: Size,
    content: Size,
    offset_y: f32,
}

impl Viewport for Host {
    fn size(&self) -> Size {
        self.size
    }

    fn content_offset(&self) -> Point {
        Point::new(0.0, self.offset_y)
    }

    fn set_content_size(&mut self, size: Size) {
        self.content = size;
    }

    fn set_normalized_position(&mut self, _axis: Axis, value: f32) {
        self.offset_y = (1.0 - value) * (self.content.height - self.size.height).max(0.0);
    }

    fn reset_content(&mut self, _axis: Axis, _anchor: ContentAnchor) {
        self.offset_y = 0.0;
    }
}

#[derive(Default)]
struct Label {
    rect: Rect,
    text: String,
}

impl ItemWidget for Label {
    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

fn main() {
    let host = Host {
        size: Size::new(320.0, 480.0),
        content: Size::default(),
        offset_y: 0.0,
    };
    let options = RecycleViewOptions::new(FlowLayout::Vertical, Size::new(320.0, 40.0))
        .with_pool_size(16);
    let mut view = RecycleView::new(host, options)
        .with_item_pool(|warm| ItemPool::new(warm, Label::default));

    view.set_count_provider(|| Ok(10_000));
    view.set_size_provider(|i| Ok(Size::new(320.0, if i % 10 == 0 { 64.0 } else { 40.0 })));
    view.set_populate_callback(|i, label: &mut Label| {
        label.text = format!("row #{i}");
        Ok(())
    });
    view.request_full_update(true);

    println!("content_size={:?}", view.content_size());
    println!("visible_range={:?}", view.visible_range());

    // The user drags the list up by 1000px.
    view.viewport_mut().offset_y = 1000.0;
    view.on_content_moved();
    let first = view.visible_range().map(|r| *r.start());
    println!("after drag: visible_range={:?}", view.visible_range());
    if let Some(label) = first.and_then(|i| view.widget(i)) {
        println!("first widget: {:?} at {:?}", label.text, label.rect);
    }

    view.scroll_to_index(-1);
    println!(
        "after scroll_to_index(-1): offset={} visible_range={:?}",
        view.viewport().offset_y,
        view.visible_range()
    );
}
