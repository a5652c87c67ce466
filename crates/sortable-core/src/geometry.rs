//! Geometry value types used by the drag-reflow engine.
//!
//! Everything here is `Copy` and recomputed per use: layout changes every frame
//! during a drag, so none of these values are cached across frames.

use crate::math::Vec2;

/// Delta between two pointer positions.
pub type Coordinates = Vec2;

/// Round to whole pixels.
///
/// Every comparison the engine makes between edges goes through this so that
/// sub-pixel layout noise never flips a decision.
#[inline]
pub fn round_px(value: f32) -> f32 {
    value.round()
}

/// An axis-aligned bounding box in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Vec2, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Offset the rect by `delta`.
    pub fn translate(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Shrink the rect by the given edges (e.g. padding).
    pub fn inset(&self, edges: Edges) -> Self {
        Self::new(
            self.x + edges.left,
            self.y + edges.top,
            (self.width - edges.horizontal()).max(0.0),
            (self.height - edges.vertical()).max(0.0),
        )
    }

    /// Whether `point` lies strictly inside the rect on both axes.
    ///
    /// Both the point and the rect are rounded to whole pixels first.
    pub fn contains_open(&self, point: Vec2) -> bool {
        let (px, py) = (round_px(point.x), round_px(point.y));
        let (top, left) = (round_px(self.y), round_px(self.x));
        let (height, width) = (round_px(self.height), round_px(self.width));

        py > top && py < top + height && px > left && px < left + width
    }
}

/// Width and height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }
}

/// Per-side lengths, used for margins and padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const ZERO: Self = Self::all(0.0);

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Same value on top and bottom, another on left and right.
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Layout direction of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Items stacked top to bottom.
    #[default]
    Vertical,
    /// Items laid out left to right.
    Horizontal,
}

impl Axis {
    pub fn is_vertical(&self) -> bool {
        matches!(self, Axis::Vertical)
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Axis::Horizontal)
    }

    /// Component of `v` along this axis.
    pub fn main(&self, v: Vec2) -> f32 {
        match self {
            Axis::Vertical => v.y,
            Axis::Horizontal => v.x,
        }
    }

    /// Leading edge of `rect` along this axis (top or left).
    pub fn leading(&self, rect: &Rect) -> f32 {
        match self {
            Axis::Vertical => rect.top(),
            Axis::Horizontal => rect.left(),
        }
    }

    /// Trailing edge of `rect` along this axis (bottom or right).
    pub fn trailing(&self, rect: &Rect) -> f32 {
        match self {
            Axis::Vertical => rect.bottom(),
            Axis::Horizontal => rect.right(),
        }
    }

    /// Extent of `size` along this axis.
    pub fn extent(&self, size: Size) -> f32 {
        match self {
            Axis::Vertical => size.height,
            Axis::Horizontal => size.width,
        }
    }

    /// Leading margin or padding along this axis.
    pub fn leading_edge(&self, edges: &Edges) -> f32 {
        match self {
            Axis::Vertical => edges.top,
            Axis::Horizontal => edges.left,
        }
    }

    /// A vector of length `amount` pointing along this axis.
    pub fn offset(&self, amount: f32) -> Vec2 {
        match self {
            Axis::Vertical => Vec2::new(0.0, amount),
            Axis::Horizontal => Vec2::new(amount, 0.0),
        }
    }
}

/// A pointer location in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub client_x: f32,
    pub client_y: f32,
}

impl Pointer {
    pub const fn new(client_x: f32, client_y: f32) -> Self {
        Self { client_x, client_y }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.client_x, self.client_y)
    }

    /// Delta travelled from `start` to this pointer.
    pub fn delta_from(&self, start: Pointer) -> Coordinates {
        self.position() - start.position()
    }
}

impl From<Vec2> for Pointer {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Box size plus all four margins, rounded to whole pixels.
///
/// This, not the raw box size, is the room a placeholder or a displaced
/// sibling has to reserve.
pub fn occupied_size(rect: &Rect, margin: &Edges) -> Size {
    Size::new(
        round_px(rect.width + margin.horizontal()),
        round_px(rect.height + margin.vertical()),
    )
}

/// Split point used by the reflow pass, per axis.
///
/// A target whose leading edge is not strictly positive (zero-sized or
/// scrolled off-screen while it is being removed or inserted) falls back to the
/// viewport edge on the pointer's side: 0 in the first half, the full extent in
/// the second half.
pub fn resolve_threshold(rect: &Rect, pointer: Pointer, viewport: Size) -> Vec2 {
    let y = if rect.top() > 0.0 {
        rect.top()
    } else if pointer.client_y < viewport.height / 2.0 {
        0.0
    } else {
        viewport.height
    };
    let x = if rect.left() > 0.0 {
        rect.left()
    } else if pointer.client_x < viewport.width / 2.0 {
        0.0
    } else {
        viewport.width
    };

    Vec2::new(round_px(x), round_px(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupied_size_includes_margins() {
        let rect = Rect::new(10.0, 10.0, 100.0, 40.0);
        let margin = Edges::new(4.0, 2.0, 6.0, 2.0);
        assert_eq!(occupied_size(&rect, &margin), Size::new(104.0, 50.0));
    }

    #[test]
    fn occupied_size_rounds() {
        let rect = Rect::new(0.0, 0.0, 99.6, 40.4);
        assert_eq!(occupied_size(&rect, &Edges::ZERO), Size::new(100.0, 40.0));
    }

    #[test]
    fn threshold_uses_leading_edges() {
        let rect = Rect::new(30.4, 120.6, 50.0, 50.0);
        let t = resolve_threshold(&rect, Pointer::new(0.0, 0.0), Size::new(800.0, 600.0));
        assert_eq!(t, Vec2::new(30.0, 121.0));
    }

    #[test]
    fn threshold_falls_back_to_viewport_half() {
        let viewport = Size::new(800.0, 600.0);

        let upper = resolve_threshold(&Rect::ZERO, Pointer::new(100.0, 100.0), viewport);
        assert_eq!(upper, Vec2::new(0.0, 0.0));

        let lower = resolve_threshold(&Rect::ZERO, Pointer::new(700.0, 500.0), viewport);
        assert_eq!(lower, Vec2::new(800.0, 600.0));
    }

    #[test]
    fn contains_open_excludes_edges() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect.contains_open(Vec2::new(50.0, 50.0)));
        assert!(!rect.contains_open(Vec2::new(0.0, 50.0)));
        assert!(!rect.contains_open(Vec2::new(50.0, 100.0)));
        assert!(!rect.contains_open(Vec2::new(150.0, 50.0)));
    }

    #[test]
    fn axis_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(Axis::Vertical.leading(&rect), 20.0);
        assert_eq!(Axis::Vertical.trailing(&rect), 60.0);
        assert_eq!(Axis::Horizontal.leading(&rect), 10.0);
        assert_eq!(Axis::Horizontal.trailing(&rect), 40.0);
        assert_eq!(Axis::Horizontal.offset(5.0), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn inset_removes_padding() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0).inset(Edges::all(10.0));
        assert_eq!(rect, Rect::new(10.0, 10.0, 80.0, 80.0));
    }
}
