// Example: a wrapping grid (rows filled left to right) with padding, spacing and diagnostics.
use recycle_view::{
    Axis, FlowLayout, ItemPool, ItemWidget, Padding, Point, Rect, RecycleView,
    RecycleViewOptions, Size, Spacing, Viewport,
};

struct Host {
    size: Size,
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
        println!("host: content size -> {size:?}");
    }

    fn set_normalized_position(&mut self, _axis: Axis, _value: f32) {}
}

#[derive(Default)]
struct Tile {
    rect: Rect,
}

impl ItemWidget for Tile {
    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

fn main() {
    let options = RecycleViewOptions::new(FlowLayout::HorizontalThenVertical, Size::new(96.0, 96.0))
        .with_padding(Padding::uniform(8.0))
        .with_spacing(Spacing::new(4.0, 4.0))
        .with_pool_size(24);
    let host = Host {
        size: Size::new(420.0, 300.0),
        offset_y: 0.0,
    };
    let mut view = RecycleView::new(host, options)
        .with_item_pool(|warm| ItemPool::new(warm, Tile::default));

    view.set_diagnostic_sink(|d| println!("diagnostic ({:?}): {d}", d.severity()));
    view.set_count_provider(|| Ok(500));
    // Every 7th tile is double width; item 13 has no size and falls back to the default.
    view.set_size_provider(|i| match i {
        13 => Err("size unknown".into()),
        _ if i % 7 == 0 => Ok(Size::new(196.0, 96.0)),
        _ => Ok(Size::new(96.0, 96.0)),
    });
    view.request_full_update(true);

    for i in view.visible_indices().take(8) {
        if let Some(tile) = view.widget(i) {
            println!("tile {i}: left_top={:?}", tile.rect.left_top());
        }
    }
    println!("visible={} content={:?}", view.visible_count(), view.content_size());
}
