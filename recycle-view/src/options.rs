use crate::{FlowLayout, Padding, Size, Spacing};

/// Configuration for [`crate::RecycleView`].
///
/// Every field feeds the layout pass: changing any of them through
/// [`crate::RecycleView::set_options`] marks all item rects dirty and schedules a full update.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize` so hosts can load it
/// from their own configuration files.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecycleViewOptions {
    pub flow: FlowLayout,
    pub padding: Padding,
    pub spacing: Spacing,
    /// Size used when no size provider is set or when it fails.
    pub default_item_size: Size,
    /// Number of recycled widgets the pool keeps warm.
    ///
    /// Also used as the item count when no count provider is set.
    pub pool_size: usize,
}

impl Default for RecycleViewOptions {
    fn default() -> Self {
        Self {
            flow: FlowLayout::Vertical,
            padding: Padding::default(),
            spacing: Spacing::default(),
            default_item_size: Size::new(100.0, 100.0),
            pool_size: 0,
        }
    }
}

impl RecycleViewOptions {
    pub fn new(flow: FlowLayout, default_item_size: Size) -> Self {
        Self {
            flow,
            default_item_size,
            ..Self::default()
        }
    }

    pub fn with_flow(mut self, flow: FlowLayout) -> Self {
        self.flow = flow;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_default_item_size(mut self, size: Size) -> Self {
        self.default_item_size = size;
        self
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }
}
