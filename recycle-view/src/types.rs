/// A point in content-local space. `y` grows upward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// An axis-aligned rectangle stored by its left-bottom corner.
///
/// Items are laid out from their left-top corner (see [`Rect::from_left_top`]), but the stored
/// form keeps the bottom-left origin so that `y..y + height` is the covered vertical span.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_left_top(left_top: Point, size: Size) -> Self {
        Self {
            x: left_top.x,
            y: left_top.y - size.height,
            width: size.width,
            height: size.height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn left_top(&self) -> Point {
        Point::new(self.x, self.top())
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Closed-interval intersection: rectangles that only touch along an edge overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.bottom() <= other.top()
            && other.bottom() <= self.top()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub const fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }
}

/// Space between neighbouring items: `x` between columns, `y` between rows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spacing {
    pub x: f32,
    pub y: f32,
}

impl Spacing {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Which corner of the viewport the content is pinned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentAnchor {
    TopLeft,
    BottomLeft,
}

/// How items are arranged inside the content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlowLayout {
    /// One column, top to bottom.
    #[default]
    Vertical,
    /// One row, left to right.
    Horizontal,
    /// Columns filled top to bottom, wrapping to the right at the viewport's bottom edge.
    VerticalThenHorizontal,
    /// Rows filled left to right, wrapping downward at the viewport's right edge.
    HorizontalThenVertical,
    /// One column anchored to the bottom of the viewport; item 0 is the oldest and sits on top.
    VerticalBottomUp,
}

impl FlowLayout {
    /// The axis the host container scrolls along.
    pub fn scroll_axis(self) -> Axis {
        match self {
            Self::Vertical | Self::HorizontalThenVertical | Self::VerticalBottomUp => {
                Axis::Vertical
            }
            Self::Horizontal | Self::VerticalThenHorizontal => Axis::Horizontal,
        }
    }

    pub fn content_anchor(self) -> ContentAnchor {
        match self {
            Self::VerticalBottomUp => ContentAnchor::BottomLeft,
            _ => ContentAnchor::TopLeft,
        }
    }

    pub fn is_bottom_up(self) -> bool {
        matches!(self, Self::VerticalBottomUp)
    }
}
