//! Mock implementation of LayoutHost for testing.
//!
//! Layout model:
//! - Containers have explicit frames in client coordinates.
//! - Children of a container stack along its axis from the content edge
//!   (frame plus padding), each taking its size plus margins.
//! - A child with `position: fixed` leaves the flow and is placed at its
//!   inline `top`/`left` plus margins.
//! - Placeholders are sized by their inline `width`/`height`, clamped by
//!   `max-width`/`max-height`.
//! - Inline transforms offset the reported rect.
//! - Root scroll offsets shift every non-fixed node; a container's own scroll
//!   offset shifts its children.

use parking_lot::Mutex;
use sortable_core::geometry::{Axis, Edges, Rect, Size};
use sortable_core::math::Vec2;
use sortable_dnd::host::{
    ComputedStyle, LayoutHost, NodeHandle, Overflow, PointerChannel, PositionKind, ScrollRequest,
    ScrollTarget,
};
use sortable_dnd::style::{InlineStyle, StyleKey, StyleProp};

/// Records a host operation for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    BoundingRect(NodeHandle),
    ComputedStyle(NodeHandle),
    SetStyle { node: NodeHandle, prop: StyleProp },
    RemoveStyle { node: NodeHandle, key: StyleKey },
    AppendPlaceholder { container: NodeHandle, node: NodeHandle },
    RemoveNode(NodeHandle),
    ScrollTo { target: ScrollTarget, request: ScrollRequest },
    AddListener(PointerChannel),
    RemoveListener(PointerChannel),
}

impl HostCall {
    /// Whether this call mutates the host.
    pub fn is_write(&self) -> bool {
        !matches!(self, HostCall::BoundingRect(_) | HostCall::ComputedStyle(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum NodeKind {
    Container { frame: Rect, axis: Axis },
    Item { size: Size },
    Placeholder,
}

#[derive(Debug, Clone)]
struct MockNode {
    kind: NodeKind,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
    margin: Edges,
    padding: Edges,
    position: PositionKind,
    overflow: Overflow,
    /// `None` when the node has no style attribute.
    style: Option<InlineStyle>,
    attached: bool,
}

impl MockNode {
    fn new(kind: NodeKind, parent: Option<NodeHandle>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            margin: Edges::ZERO,
            padding: Edges::ZERO,
            position: PositionKind::Static,
            overflow: Overflow::Visible,
            style: None,
            attached: true,
        }
    }

    fn position(&self) -> PositionKind {
        self.style
            .as_ref()
            .and_then(|s| s.position())
            .unwrap_or(self.position)
    }

    fn length(&self, key: StyleKey) -> Option<f32> {
        self.style.as_ref().and_then(|s| s.length(key))
    }

    fn transform(&self) -> Vec2 {
        self.style
            .as_ref()
            .and_then(|s| s.transform())
            .unwrap_or(Vec2::ZERO)
    }

    /// Border-box size, before transforms.
    fn box_size(&self) -> Size {
        match self.kind {
            NodeKind::Container { frame, .. } => frame.size(),
            NodeKind::Item { size } => Size::new(
                self.length(StyleKey::Width).unwrap_or(size.width),
                self.length(StyleKey::Height).unwrap_or(size.height),
            ),
            NodeKind::Placeholder => {
                let width = self.length(StyleKey::Width).unwrap_or(0.0);
                let height = self.length(StyleKey::Height).unwrap_or(0.0);
                Size::new(
                    self.length(StyleKey::MaxWidth).map_or(width, |max| width.min(max)),
                    self.length(StyleKey::MaxHeight).map_or(height, |max| height.min(max)),
                )
            }
        }
    }
}

/// Mock implementation of [`LayoutHost`] for testing.
///
/// # Example
///
/// ```rust
/// use sortable_core::geometry::{Axis, Rect, Size};
/// use sortable_dnd::{LayoutHost, StyleKey, StyleProp};
/// use sortable_test_utils::MockLayoutHost;
///
/// let mut host = MockLayoutHost::new();
/// let column = host.add_container(Rect::new(0.0, 0.0, 100.0, 300.0), Axis::Vertical);
/// let item = host.add_item(column, Size::new(100.0, 30.0));
///
/// host.set_style(item, StyleProp::Top(5.0));
/// host.remove_style(item, StyleKey::Top);
///
/// assert!(host.style(item).is_none());
/// assert_eq!(host.count_style_writes(), 2);
/// ```
pub struct MockLayoutHost {
    nodes: Vec<MockNode>,
    viewport: Size,
    root_scroll: Vec2,
    node_scroll: Vec<(NodeHandle, Vec2)>,
    active_listeners: Vec<PointerChannel>,
    /// Recorded calls for verification
    calls: Mutex<Vec<HostCall>>,
}

impl MockLayoutHost {
    /// Create an empty host with an 800x600 viewport.
    pub fn new() -> Self {
        Self::with_viewport(Size::new(800.0, 600.0))
    }

    pub fn with_viewport(viewport: Size) -> Self {
        Self {
            nodes: Vec::new(),
            viewport,
            root_scroll: Vec2::ZERO,
            node_scroll: Vec::new(),
            active_listeners: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    // ------------------------------------------------------------------
    // Tree building
    // ------------------------------------------------------------------

    fn push(&mut self, node: MockNode) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len() as u64);
        if let Some(parent) = node.parent
            && let Some(p) = self.node_mut(parent)
        {
            p.children.push(handle);
        }
        self.nodes.push(node);
        handle
    }

    /// Add a top-level container occupying `frame`.
    pub fn add_container(&mut self, frame: Rect, axis: Axis) -> NodeHandle {
        self.push(MockNode::new(NodeKind::Container { frame, axis }, None))
    }

    /// Add a container nested under `parent`.
    ///
    /// The frame is still absolute; nesting only affects ancestry.
    pub fn add_container_in(&mut self, parent: NodeHandle, frame: Rect, axis: Axis) -> NodeHandle {
        self.push(MockNode::new(NodeKind::Container { frame, axis }, Some(parent)))
    }

    /// Append an item of `size` to `container`.
    pub fn add_item(&mut self, container: NodeHandle, size: Size) -> NodeHandle {
        self.push(MockNode::new(NodeKind::Item { size }, Some(container)))
    }

    pub fn set_margin(&mut self, node: NodeHandle, margin: Edges) {
        if let Some(n) = self.node_mut(node) {
            n.margin = margin;
        }
    }

    pub fn set_padding(&mut self, node: NodeHandle, padding: Edges) {
        if let Some(n) = self.node_mut(node) {
            n.padding = padding;
        }
    }

    pub fn set_overflow(&mut self, node: NodeHandle, overflow: Overflow) {
        if let Some(n) = self.node_mut(node) {
            n.overflow = overflow;
        }
    }

    pub fn set_position(&mut self, node: NodeHandle, position: PositionKind) {
        if let Some(n) = self.node_mut(node) {
            n.position = position;
        }
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// Inline style of `node`, `None` when it has no style attribute.
    pub fn style(&self, node: NodeHandle) -> Option<InlineStyle> {
        self.node(node).and_then(|n| n.style.clone())
    }

    pub fn has_style_attr(&self, node: NodeHandle) -> bool {
        self.node(node).is_some_and(|n| n.style.is_some())
    }

    pub fn is_attached(&self, node: NodeHandle) -> bool {
        self.node(node).is_some_and(|n| n.attached)
    }

    /// Attached children of `container`, in order.
    pub fn children(&self, container: NodeHandle) -> Vec<NodeHandle> {
        self.node(container)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Attached placeholders of `container`.
    pub fn placeholders(&self, container: NodeHandle) -> Vec<NodeHandle> {
        self.children(container)
            .into_iter()
            .filter(|c| matches!(self.node(*c).map(|n| n.kind), Some(NodeKind::Placeholder)))
            .collect()
    }

    /// Rect without recording a read.
    pub fn peek_rect(&self, node: NodeHandle) -> Rect {
        self.layout_rect(node)
    }

    pub fn active_listeners(&self) -> usize {
        self.active_listeners.len()
    }

    pub fn is_listening(&self, channel: PointerChannel) -> bool {
        self.active_listeners.contains(&channel)
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn count_rect_reads(&self) -> usize {
        self.count(|c| matches!(c, HostCall::BoundingRect(_)))
    }

    pub fn count_style_writes(&self) -> usize {
        self.count(|c| matches!(c, HostCall::SetStyle { .. } | HostCall::RemoveStyle { .. }))
    }

    pub fn count_listener_adds(&self) -> usize {
        self.count(|c| matches!(c, HostCall::AddListener(_)))
    }

    pub fn count_listener_removes(&self) -> usize {
        self.count(|c| matches!(c, HostCall::RemoveListener(_)))
    }

    pub fn count_scrolls(&self) -> usize {
        self.count(|c| matches!(c, HostCall::ScrollTo { .. }))
    }

    fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().push(call);
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    fn node(&self, handle: NodeHandle) -> Option<&MockNode> {
        self.nodes.get(handle.0 as usize)
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut MockNode> {
        self.nodes.get_mut(handle.0 as usize)
    }

    fn live_mut(&mut self, handle: NodeHandle) -> Option<&mut MockNode> {
        self.node_mut(handle).filter(|n| n.attached)
    }

    fn node_scroll(&self, handle: NodeHandle) -> Vec2 {
        self.node_scroll
            .iter()
            .find(|(h, _)| *h == handle)
            .map_or(Vec2::ZERO, |(_, offset)| *offset)
    }

    fn layout_rect(&self, handle: NodeHandle) -> Rect {
        let Some(node) = self.node(handle).filter(|n| n.attached) else {
            return Rect::ZERO;
        };

        let base = if node.position() == PositionKind::Fixed {
            let top = node.length(StyleKey::Top).unwrap_or(0.0);
            let left = node.length(StyleKey::Left).unwrap_or(0.0);
            Rect::from_origin_size(
                Vec2::new(left + node.margin.left, top + node.margin.top),
                node.box_size(),
            )
        } else {
            match (node.kind, node.parent) {
                (NodeKind::Container { frame, .. }, _) => frame.translate(-self.root_scroll),
                (_, Some(parent)) => self.flow_rect(parent, handle),
                (_, None) => Rect::from_origin_size(Vec2::ZERO, node.box_size()),
            }
        };

        base.translate(node.transform())
    }

    /// Position of `child` in the flow of `parent`.
    fn flow_rect(&self, parent: NodeHandle, child: NodeHandle) -> Rect {
        let Some(p) = self.node(parent) else {
            return Rect::ZERO;
        };
        let (frame, axis) = match p.kind {
            NodeKind::Container { frame, axis } => (frame, axis),
            _ => return Rect::ZERO,
        };
        let content = frame
            .translate(-self.root_scroll - self.node_scroll(parent))
            .inset(p.padding);

        let mut cursor = Vec2::new(content.left(), content.top());
        for sibling in &p.children {
            let Some(s) = self.node(*sibling) else {
                continue;
            };
            if !s.attached || s.position() == PositionKind::Fixed {
                continue;
            }
            let size = s.box_size();
            if *sibling == child {
                let origin = cursor + Vec2::new(s.margin.left, s.margin.top);
                return Rect::from_origin_size(origin, size);
            }
            let advance = match axis {
                Axis::Vertical => Vec2::new(0.0, size.height + s.margin.vertical()),
                Axis::Horizontal => Vec2::new(size.width + s.margin.horizontal(), 0.0),
            };
            cursor += advance;
        }
        Rect::ZERO
    }
}

impl Default for MockLayoutHost {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutHost for MockLayoutHost {
    fn bounding_rect(&self, node: NodeHandle) -> Rect {
        self.record(HostCall::BoundingRect(node));
        self.layout_rect(node)
    }

    fn computed_style(&self, node: NodeHandle) -> ComputedStyle {
        self.record(HostCall::ComputedStyle(node));
        let Some(n) = self.node(node) else {
            return ComputedStyle::default();
        };
        ComputedStyle {
            margin: n.margin,
            padding: n.padding,
            position: n.position(),
            overflow_x: n.overflow,
            overflow_y: n.overflow,
            transform: n.style.as_ref().and_then(|s| s.transform()),
        }
    }

    fn parent(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.node(node).and_then(|n| n.parent)
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn set_style(&mut self, node: NodeHandle, prop: StyleProp) {
        self.record(HostCall::SetStyle { node, prop });
        if let Some(n) = self.live_mut(node) {
            n.style.get_or_insert_with(InlineStyle::new).set(prop);
        }
    }

    fn remove_style(&mut self, node: NodeHandle, key: StyleKey) {
        self.record(HostCall::RemoveStyle { node, key });
        if let Some(n) = self.live_mut(node)
            && let Some(style) = n.style.as_mut()
        {
            style.remove(key);
            if style.is_empty() {
                n.style = None;
            }
        }
    }

    fn append_placeholder(&mut self, container: NodeHandle) -> NodeHandle {
        let node = self.push(MockNode::new(NodeKind::Placeholder, Some(container)));
        self.record(HostCall::AppendPlaceholder { container, node });
        node
    }

    fn remove_node(&mut self, node: NodeHandle) {
        self.record(HostCall::RemoveNode(node));
        let Some(parent) = self.live_mut(node).map(|n| {
            n.attached = false;
            n.parent
        }) else {
            return;
        };
        if let Some(parent) = parent
            && let Some(p) = self.node_mut(parent)
        {
            p.children.retain(|c| *c != node);
        }
    }

    fn scroll_offset(&self, target: ScrollTarget) -> Vec2 {
        match target {
            ScrollTarget::Root => self.root_scroll,
            ScrollTarget::Node(node) => self.node_scroll(node),
        }
    }

    fn scroll_to(&mut self, target: ScrollTarget, request: ScrollRequest) {
        self.record(HostCall::ScrollTo { target, request });
        let current = self.scroll_offset(target);
        let next = Vec2::new(
            request.left.unwrap_or(current.x),
            request.top.unwrap_or(current.y),
        );
        match target {
            ScrollTarget::Root => self.root_scroll = next,
            ScrollTarget::Node(node) => {
                self.node_scroll.retain(|(h, _)| *h != node);
                self.node_scroll.push((node, next));
            }
        }
    }

    fn add_listener(&mut self, channel: PointerChannel) {
        self.record(HostCall::AddListener(channel));
        self.active_listeners.push(channel);
    }

    fn remove_listener(&mut self, channel: PointerChannel) {
        self.record(HostCall::RemoveListener(channel));
        if let Some(index) = self.active_listeners.iter().position(|c| *c == channel) {
            self.active_listeners.remove(index);
        }
    }
}
