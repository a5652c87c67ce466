//! Layout measurement through the host.

use crate::host::{LayoutHost, NodeHandle, PositionKind, ScrollTarget};
use sortable_core::geometry::{Edges, Rect, Size, occupied_size};

/// Bounding rect, margins and occupied size of one node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeMetrics {
    pub rect: Rect,
    pub margin: Edges,
    /// Box plus margins, rounded to whole pixels.
    pub occupied: Size,
}

/// Read the rect and margins of `node`.
pub fn measure_node(host: &dyn LayoutHost, node: NodeHandle) -> NodeMetrics {
    let rect = host.bounding_rect(node);
    let margin = host.computed_style(node).margin;
    NodeMetrics {
        rect,
        margin,
        occupied: occupied_size(&rect, &margin),
    }
}

/// Nearest ancestor of `node` that scrolls.
///
/// A fixed node scrolls with the root. An absolutely positioned node skips
/// statically positioned ancestors, since they do not contain it.
pub fn resolve_scroll_ancestor(host: &dyn LayoutHost, node: NodeHandle) -> ScrollTarget {
    let position = host.computed_style(node).position;
    if position == PositionKind::Fixed {
        return ScrollTarget::Root;
    }
    let skip_static = position == PositionKind::Absolute;

    let mut current = host.parent(node);
    while let Some(ancestor) = current {
        let style = host.computed_style(ancestor);
        if !(skip_static && style.position == PositionKind::Static) && style.scrolls() {
            return ScrollTarget::Node(ancestor);
        }
        current = host.parent(ancestor);
    }

    ScrollTarget::Root
}

/// The container itself when it scrolls, otherwise its scroll ancestor.
pub fn resolve_container_scroll(host: &dyn LayoutHost, container: NodeHandle) -> ScrollTarget {
    if host.computed_style(container).scrolls() {
        ScrollTarget::Node(container)
    } else {
        resolve_scroll_ancestor(host, container)
    }
}

/// Visible rect of a scroll target in client coordinates.
pub fn visible_rect(host: &dyn LayoutHost, target: ScrollTarget) -> Rect {
    match target {
        ScrollTarget::Root => {
            let viewport = host.viewport();
            Rect::new(0.0, 0.0, viewport.width, viewport.height)
        }
        ScrollTarget::Node(node) => host.bounding_rect(node),
    }
}
