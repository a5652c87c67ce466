//! Payloads passed to the drag callbacks.

use crate::host::NodeHandle;
use sortable_core::geometry::Pointer;
use sortable_core::id::{ContainerId, ContextId, DraggableId, GroupId};

/// Fired once a drag has started and the node is lifted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStartEvent {
    pub context_id: ContextId,
    pub draggable_id: DraggableId,
    pub container_id: ContainerId,
    pub group_id: GroupId,
    pub source_idx: usize,
    pub pointer: Pointer,
}

/// Fired after every reflow pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOverEvent {
    pub draggable_id: DraggableId,
    pub container_id: ContainerId,
    pub group_id: GroupId,
    /// Non-shifted sibling closest above (or left of) the target.
    pub nearest: Option<NodeHandle>,
    /// The node the reflow was computed against.
    pub target: NodeHandle,
}

/// Fired when the settle animation completes.
///
/// Feed it to [`apply_drag_end`](crate::list::apply_drag_end) to get the new
/// canonical order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEndEvent {
    pub draggable_id: DraggableId,
    /// Container the item was dropped into.
    pub container_id: ContainerId,
    pub group_id: GroupId,
    /// Container the drag started in.
    pub source_container_id: ContainerId,
    /// Index of the item in its source container.
    pub source_idx: usize,
    /// Index of the item in the destination container.
    pub destination_idx: usize,
    /// The item changed containers.
    pub is_moving: bool,
    /// The lifted node.
    pub target: NodeHandle,
}
