//! Spacer nodes that reserve room for the lifted item.
//!
//! The origin container gets a placeholder at full size straight away. A
//! container that receives the drag later opens it from zero over one
//! transition, and a container that loses the drag collapses it the same way
//! before removing the node.

use crate::error::PlaceholderError;
use crate::host::{LayoutHost, NodeHandle};
use crate::scheduler::{Scheduler, Task};
use crate::style::{StyleProp, Transition, TransitionProperty};
use sortable_core::alloc::HashMap;
use sortable_core::geometry::Size;
use sortable_core::id::ContainerId;
use std::collections::hash_map::Entry;

/// How a placeholder is taken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalMode {
    /// Remove the node now. Used when the drag ends.
    Instant,
    /// Animate the max size down to zero, then remove the node.
    Collapse,
}

/// A placeholder living in one container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderSlot {
    pub node: NodeHandle,
    pub size: Size,
    pub transition: Transition,
}

/// One placeholder slot per container.
#[derive(Debug, Default)]
pub struct PlaceholderManager {
    slots: HashMap<ContainerId, PlaceholderSlot>,
}

fn max_size_transition(transition: Transition) -> Transition {
    Transition {
        properties: TransitionProperty::MAX_WIDTH | TransitionProperty::MAX_HEIGHT,
        ..transition
    }
}

impl PlaceholderManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a placeholder of `size` to `container_node`.
    ///
    /// With `opening` set the spacer starts at zero max size and opens on the
    /// next frame.
    #[allow(clippy::too_many_arguments)]
    pub fn insert(
        &mut self,
        host: &mut dyn LayoutHost,
        scheduler: &mut Scheduler,
        container: ContainerId,
        container_node: NodeHandle,
        size: Size,
        opening: bool,
        transition: Transition,
    ) -> Result<NodeHandle, PlaceholderError> {
        let Entry::Vacant(entry) = self.slots.entry(container) else {
            return Err(PlaceholderError::AlreadyInserted(container));
        };

        let node = host.append_placeholder(container_node);
        let transition = max_size_transition(transition);
        host.set_style(node, StyleProp::FlexNone);
        if opening {
            host.set_style(node, StyleProp::MaxWidth(0.0));
            host.set_style(node, StyleProp::MaxHeight(0.0));
            host.set_style(node, StyleProp::Width(size.width));
            host.set_style(node, StyleProp::Height(size.height));
            scheduler.request_frame(Task::OpenPlaceholder {
                node,
                size,
                transition,
            });
        } else {
            host.set_style(node, StyleProp::Width(size.width));
            host.set_style(node, StyleProp::Height(size.height));
        }

        tracing::trace!("Placeholder {} inserted into {} (opening: {})", node, container, opening);
        entry.insert(PlaceholderSlot {
            node,
            size,
            transition,
        });
        Ok(node)
    }

    /// Take the placeholder out of `container`. The slot frees immediately.
    pub fn remove(
        &mut self,
        host: &mut dyn LayoutHost,
        scheduler: &mut Scheduler,
        container: ContainerId,
        mode: RemovalMode,
    ) -> Option<PlaceholderSlot> {
        let slot = self.slots.remove(&container)?;
        match mode {
            RemovalMode::Instant => host.remove_node(slot.node),
            RemovalMode::Collapse => {
                host.set_style(slot.node, StyleProp::Transition(Some(slot.transition)));
                host.set_style(slot.node, StyleProp::MaxWidth(slot.size.width));
                host.set_style(slot.node, StyleProp::MaxHeight(slot.size.height));
                scheduler.request_frame(Task::CollapsePlaceholder {
                    node: slot.node,
                    transition: slot.transition,
                });
            }
        }
        tracing::trace!("Placeholder {} removed from {} ({:?})", slot.node, container, mode);
        Some(slot)
    }

    /// Remove every placeholder at once.
    pub fn clear(&mut self, host: &mut dyn LayoutHost) {
        for (_, slot) in self.slots.drain() {
            host.remove_node(slot.node);
        }
    }

    pub fn holds(&self, container: ContainerId) -> bool {
        self.slots.contains_key(&container)
    }

    pub fn get(&self, container: ContainerId) -> Option<&PlaceholderSlot> {
        self.slots.get(&container)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Second half of an opening insert: transition the max size to full.
pub(crate) fn open(host: &mut dyn LayoutHost, node: NodeHandle, size: Size, transition: Transition) {
    host.set_style(node, StyleProp::Transition(Some(transition)));
    host.set_style(node, StyleProp::MaxWidth(size.width));
    host.set_style(node, StyleProp::MaxHeight(size.height));
}

/// Second half of a collapse: shrink to zero, remove once the transition ends.
pub(crate) fn collapse(
    host: &mut dyn LayoutHost,
    scheduler: &mut Scheduler,
    node: NodeHandle,
    transition: Transition,
) {
    host.set_style(node, StyleProp::MaxWidth(0.0));
    host.set_style(node, StyleProp::MaxHeight(0.0));
    scheduler.schedule(transition.duration, Task::RemoveNode { node });
}
