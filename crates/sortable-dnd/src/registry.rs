//! Registered containers and their live, ordered item nodes.

use crate::config::ContainerConfig;
use crate::host::NodeHandle;
use indexmap::IndexMap;
use sortable_core::id::{ContainerId, DraggableId, GroupId};

/// One draggable item and the node that renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemEntry {
    pub id: DraggableId,
    pub node: NodeHandle,
}

impl ItemEntry {
    pub fn new(id: impl Into<DraggableId>, node: NodeHandle) -> Self {
        Self {
            id: id.into(),
            node,
        }
    }
}

/// A registered container.
#[derive(Debug, Clone)]
pub struct ContainerEntry {
    pub config: ContainerConfig,
    pub node: NodeHandle,
    /// Items in render order.
    pub items: Vec<ItemEntry>,
}

impl ContainerEntry {
    pub fn id(&self) -> ContainerId {
        self.config.id
    }

    pub fn group(&self) -> GroupId {
        self.config.group
    }

    pub fn is_enabled(&self) -> bool {
        !self.config.disabled
    }

    pub fn index_of(&self, draggable: DraggableId) -> Option<usize> {
        self.items.iter().position(|item| item.id == draggable)
    }

    pub fn item_nodes(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.items.iter().map(|item| item.node)
    }
}

/// Insertion-ordered registry of containers.
///
/// Replaces discovery by node attributes: the host registers each container
/// and keeps its item list current whenever it re-renders.
#[derive(Debug, Default)]
pub struct ContainerRegistry {
    containers: IndexMap<ContainerId, ContainerEntry>,
}

impl ContainerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a container.
    pub fn register(&mut self, config: ContainerConfig, node: NodeHandle) {
        tracing::debug!("Registering container {} on {}", config.id, node);
        if let Some(entry) = self.containers.get_mut(&config.id) {
            entry.config = config;
            entry.node = node;
            return;
        }
        self.containers.insert(
            config.id,
            ContainerEntry {
                config,
                node,
                items: Vec::new(),
            },
        );
    }

    pub fn unregister(&mut self, id: ContainerId) -> Option<ContainerEntry> {
        tracing::debug!("Unregistering container {}", id);
        self.containers.shift_remove(&id)
    }

    /// Replace the item list of a container. Returns false if unknown.
    pub fn set_items(&mut self, id: ContainerId, items: Vec<ItemEntry>) -> bool {
        match self.containers.get_mut(&id) {
            Some(entry) => {
                entry.items = items;
                true
            }
            None => false,
        }
    }

    pub fn set_disabled(&mut self, id: ContainerId, disabled: bool) -> bool {
        match self.containers.get_mut(&id) {
            Some(entry) => {
                entry.config.disabled = disabled;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: ContainerId) -> Option<&ContainerEntry> {
        self.containers.get(&id)
    }

    pub fn get_mut(&mut self, id: ContainerId) -> Option<&mut ContainerEntry> {
        self.containers.get_mut(&id)
    }

    pub fn contains(&self, id: ContainerId) -> bool {
        self.containers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContainerEntry> {
        self.containers.values()
    }

    /// Enabled containers of `group` other than `except`, in registration order.
    pub fn candidates(
        &self,
        group: GroupId,
        except: ContainerId,
    ) -> impl Iterator<Item = &ContainerEntry> {
        self.iter()
            .filter(move |c| c.group() == group && c.id() != except && c.is_enabled())
    }

    /// Container currently holding `draggable`.
    pub fn find_draggable(&self, draggable: DraggableId) -> Option<&ContainerEntry> {
        self.iter().find(|c| c.index_of(draggable).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortable_core::id::Id;

    fn registry() -> ContainerRegistry {
        let mut registry = ContainerRegistry::new();
        registry.register(ContainerConfig::new("a").group("g"), NodeHandle(1));
        registry.register(ContainerConfig::new("b").group("g"), NodeHandle(2));
        registry.register(ContainerConfig::new("c").group("other"), NodeHandle(3));
        registry.set_items(
            Id::new("a"),
            vec![
                ItemEntry::new(10u64, NodeHandle(11)),
                ItemEntry::new(20u64, NodeHandle(12)),
            ],
        );
        registry
    }

    #[test]
    fn lookup_items() {
        let registry = registry();
        let a = registry.get(Id::new("a")).map(|c| c.index_of(Id::from_raw(20)));
        assert_eq!(a, Some(Some(1)));
        assert_eq!(
            registry.find_draggable(Id::from_raw(10)).map(|c| c.id()),
            Some(Id::new("a"))
        );
        assert!(registry.find_draggable(Id::from_raw(99)).is_none());
    }

    #[test]
    fn candidates_filter_group_and_disabled() {
        let mut registry = registry();
        let ids: Vec<_> = registry
            .candidates(GroupId::new("g"), Id::new("a"))
            .map(|c| c.id())
            .collect();
        assert_eq!(ids, vec![Id::new("b")]);

        registry.set_disabled(Id::new("b"), true);
        assert_eq!(registry.candidates(GroupId::new("g"), Id::new("a")).count(), 0);
    }

    #[test]
    fn re_register_keeps_items() {
        let mut registry = registry();
        registry.register(ContainerConfig::new("a").group("g").disabled(true), NodeHandle(1));
        let entry = registry.get(Id::new("a"));
        assert_eq!(entry.map(|e| e.items.len()), Some(2));
        assert_eq!(entry.map(|e| e.is_enabled()), Some(false));
        assert!(!registry.set_items(Id::new("zzz"), Vec::new()));
    }
}
