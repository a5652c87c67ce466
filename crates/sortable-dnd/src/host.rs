//! Trait abstracting the layout and style operations the engine performs.
//!
//! The engine never touches a view layer directly. Every rectangle read,
//! computed-style read, inline style write, placeholder insertion, scroll and
//! global listener registration goes through [`LayoutHost`], so the same engine
//! can drive a DOM binding, a retained-mode UI tree or the recording mock in
//! `sortable-test-utils`.

use crate::style::{StyleKey, StyleProp};
use sortable_core::geometry::{Edges, Rect, Size};
use sortable_core::math::Vec2;
use std::fmt;

/// Opaque handle to a node owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub u64);

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// CSS-like positioning scheme of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PositionKind {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl PositionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionKind::Static => "static",
            PositionKind::Relative => "relative",
            PositionKind::Absolute => "absolute",
            PositionKind::Fixed => "fixed",
            PositionKind::Sticky => "sticky",
        }
    }
}

/// Overflow behavior on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Auto,
    Scroll,
}

impl Overflow {
    /// `auto` and `scroll` make a node a scroll container.
    pub fn is_scrollable(&self) -> bool {
        matches!(self, Overflow::Auto | Overflow::Scroll)
    }
}

/// The subset of computed style the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComputedStyle {
    pub margin: Edges,
    pub padding: Edges,
    pub position: PositionKind,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    /// Current translation, `None` when the computed transform is `none`.
    pub transform: Option<Vec2>,
}

impl ComputedStyle {
    /// Whether either axis scrolls.
    pub fn scrolls(&self) -> bool {
        self.overflow_x.is_scrollable() || self.overflow_y.is_scrollable()
    }

    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }
}

/// What gets scrolled: the document root or a scrollable ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollTarget {
    #[default]
    Root,
    Node(NodeHandle),
}

/// How a scroll request is animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollBehavior {
    /// Jump immediately.
    Instant,
    /// Let the host animate the scroll.
    #[default]
    Smooth,
}

/// A request to scroll a target to an absolute offset.
///
/// Axes left as `None` keep their current offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollRequest {
    pub top: Option<f32>,
    pub left: Option<f32>,
    pub behavior: ScrollBehavior,
}

/// Global pointer listener channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerChannel {
    /// Pointer movement anywhere in the document.
    Move,
    /// Pointer release anywhere in the document.
    Up,
}

/// Trait abstracting layout reads and style writes.
///
/// # Contract
///
/// - [`bounding_rect`](LayoutHost::bounding_rect) reports the border box in
///   client coordinates, transforms included.
/// - [`remove_style`](LayoutHost::remove_style) is a no-op for a property that
///   is not set, and a host drops the node's style attribute entirely once it
///   holds no declarations.
/// - Operations on nodes the host no longer knows about are ignored.
pub trait LayoutHost {
    /// Border box of `node` in client coordinates.
    fn bounding_rect(&self, node: NodeHandle) -> Rect;

    /// Computed style of `node`.
    fn computed_style(&self, node: NodeHandle) -> ComputedStyle;

    /// Parent of `node`, `None` at the document root.
    fn parent(&self, node: NodeHandle) -> Option<NodeHandle>;

    /// Size of the visible viewport.
    fn viewport(&self) -> Size;

    /// Write one inline style declaration.
    fn set_style(&mut self, node: NodeHandle, prop: StyleProp);

    /// Remove one inline style declaration.
    fn remove_style(&mut self, node: NodeHandle, key: StyleKey);

    /// Create an empty spacer node and append it as the last child of `container`.
    fn append_placeholder(&mut self, container: NodeHandle) -> NodeHandle;

    /// Detach and destroy `node`.
    fn remove_node(&mut self, node: NodeHandle);

    /// Current scroll offset of `target`.
    fn scroll_offset(&self, target: ScrollTarget) -> Vec2;

    /// Scroll `target` to an absolute offset.
    fn scroll_to(&mut self, target: ScrollTarget, request: ScrollRequest);

    /// Start delivering events on `channel` to the engine.
    fn add_listener(&mut self, channel: PointerChannel);

    /// Stop delivering events on `channel` to the engine.
    fn remove_listener(&mut self, channel: PointerChannel);
}
