//! Pure reorder and move transforms over host-owned item collections.
//!
//! A single flat `Vec` holds the items of every container. Each transform
//! partitions it into the container's subset and the rest, edits the subset
//! and returns `rest ++ subset`. Relative order inside both parts is kept.

use crate::events::DragEndEvent;
use sortable_core::id::{ContainerId, DraggableId};

/// An item that lives in one container at a time.
pub trait SortableItem {
    fn draggable_id(&self) -> DraggableId;
    fn container_id(&self) -> ContainerId;
    fn set_container_id(&mut self, container: ContainerId);
}

fn partition<T: SortableItem>(items: Vec<T>, container: ContainerId) -> (Vec<T>, Vec<T>) {
    items
        .into_iter()
        .partition(|item| item.container_id() == container)
}

/// Move the item at `source_idx` of `container` to `destination_idx`.
///
/// Indices are relative to the container's subset. The destination is clamped
/// to the subset; an out-of-range source leaves the input untouched.
pub fn reorder<T: SortableItem>(
    items: Vec<T>,
    container: ContainerId,
    source_idx: usize,
    destination_idx: usize,
) -> Vec<T> {
    let (mut subset, mut rest) = partition(items, container);

    if source_idx < subset.len() {
        let item = subset.remove(source_idx);
        let destination_idx = destination_idx.min(subset.len());
        subset.insert(destination_idx, item);
    } else {
        tracing::warn!(
            "reorder: source index {} out of range for {} ({} items)",
            source_idx,
            container,
            subset.len()
        );
    }

    rest.append(&mut subset);
    rest
}

/// Move `draggable` into `container` at `destination_idx`.
///
/// The item is looked up across every container. An unknown id leaves the
/// input untouched.
pub fn move_item<T: SortableItem>(
    mut items: Vec<T>,
    container: ContainerId,
    draggable: DraggableId,
    destination_idx: usize,
) -> Vec<T> {
    let Some(position) = items.iter().position(|item| item.draggable_id() == draggable) else {
        tracing::warn!("move_item: draggable {} not found", draggable);
        return items;
    };

    let mut item = items.remove(position);
    item.set_container_id(container);

    let (mut subset, mut rest) = partition(items, container);
    let destination_idx = destination_idx.min(subset.len());
    subset.insert(destination_idx, item);

    rest.append(&mut subset);
    rest
}

/// Apply a completed drag to `items`.
pub fn apply_drag_end<T: SortableItem>(items: Vec<T>, event: &DragEndEvent) -> Vec<T> {
    if event.is_moving {
        move_item(
            items,
            event.container_id,
            event.draggable_id,
            event.destination_idx,
        )
    } else {
        reorder(
            items,
            event.container_id,
            event.source_idx,
            event.destination_idx,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NodeHandle;
    use proptest::prelude::*;
    use sortable_core::id::Id;

    #[derive(Debug, Clone, PartialEq)]
    struct Card {
        id: DraggableId,
        column: ContainerId,
    }

    impl SortableItem for Card {
        fn draggable_id(&self) -> DraggableId {
            self.id
        }

        fn container_id(&self) -> ContainerId {
            self.column
        }

        fn set_container_id(&mut self, container: ContainerId) {
            self.column = container;
        }
    }

    fn card(id: u64, column: u64) -> Card {
        Card {
            id: Id::from_raw(id),
            column: Id::from_raw(column),
        }
    }

    fn ids(items: &[Card]) -> Vec<u64> {
        items.iter().map(|c| c.id.as_u64()).collect()
    }

    #[test]
    fn reorder_moves_within_container() {
        let items = vec![card(1, 10), card(2, 10), card(3, 10), card(4, 10)];
        let out = reorder(items, Id::from_raw(10), 2, 0);
        assert_eq!(ids(&out), vec![3, 1, 2, 4]);
    }

    #[test]
    fn reorder_puts_container_last() {
        let items = vec![card(1, 10), card(2, 20), card(3, 10)];
        let out = reorder(items, Id::from_raw(10), 0, 1);
        assert_eq!(ids(&out), vec![2, 3, 1]);
    }

    #[test]
    fn reorder_clamps_destination() {
        let items = vec![card(1, 10), card(2, 10)];
        let out = reorder(items, Id::from_raw(10), 0, 99);
        assert_eq!(ids(&out), vec![2, 1]);
    }

    #[test]
    fn reorder_ignores_bad_source() {
        let items = vec![card(1, 10), card(2, 10)];
        let out = reorder(items, Id::from_raw(10), 5, 0);
        assert_eq!(ids(&out), vec![1, 2]);
    }

    #[test]
    fn move_item_changes_container() {
        let items = vec![card(1, 10), card(2, 20), card(3, 20), card(4, 10)];
        let out = move_item(items, Id::from_raw(20), Id::from_raw(1), 1);
        assert_eq!(ids(&out), vec![4, 2, 1, 3]);
        assert_eq!(out[2].column, Id::from_raw(20));
    }

    #[test]
    fn move_item_unknown_is_noop() {
        let items = vec![card(1, 10), card(2, 20)];
        let out = move_item(items.clone(), Id::from_raw(20), Id::from_raw(9), 0);
        assert_eq!(out, items);
    }

    #[test]
    fn apply_drag_end_dispatches() {
        let event = DragEndEvent {
            draggable_id: Id::from_raw(3),
            container_id: Id::from_raw(20),
            group_id: Id::from_raw(1),
            source_container_id: Id::from_raw(10),
            source_idx: 1,
            destination_idx: 0,
            is_moving: true,
            target: NodeHandle(0),
        };
        let items = vec![card(1, 10), card(3, 10), card(2, 20)];
        let out = apply_drag_end(items, &event);
        assert_eq!(ids(&out), vec![1, 3, 2]);
        assert_eq!(out[1].column, Id::from_raw(20));
    }

    fn arb_items() -> impl Strategy<Value = Vec<Card>> {
        prop::collection::vec(0u64..3, 0..12).prop_map(|columns| {
            columns
                .into_iter()
                .enumerate()
                .map(|(i, column)| card(i as u64, column))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn reorder_preserves_items(items in arb_items(), column in 0u64..3, src in 0usize..12, dst in 0usize..12) {
            let before = items.clone();
            let out = reorder(items, Id::from_raw(column), src, dst);

            let mut a = ids(&before);
            let mut b = ids(&out);
            a.sort_unstable();
            b.sort_unstable();
            prop_assert_eq!(a, b);

            let others = |v: &[Card]| -> Vec<u64> {
                v.iter().filter(|c| c.column.as_u64() != column).map(|c| c.id.as_u64()).collect()
            };
            prop_assert_eq!(others(&before), others(&out));
        }

        #[test]
        fn reorder_same_index_keeps_subset_order(items in arb_items(), column in 0u64..3, idx in 0usize..12) {
            let column = Id::from_raw(column);
            let subset = |v: &[Card]| -> Vec<u64> {
                v.iter().filter(|c| c.column == column).map(|c| c.id.as_u64()).collect()
            };
            let before = subset(&items);
            let out = reorder(items, column, idx, idx);
            prop_assert_eq!(before, subset(&out));
        }

        #[test]
        fn move_item_changes_one_container(items in arb_items(), column in 0u64..3, pick in 0usize..12, dst in 0usize..12) {
            prop_assume!(!items.is_empty());
            let target = items[pick % items.len()].id;
            let before = items.clone();
            let out = move_item(items, Id::from_raw(column), target, dst);

            prop_assert_eq!(before.len(), out.len());
            let changed = before
                .iter()
                .filter(|b| {
                    out.iter()
                        .find(|o| o.id == b.id)
                        .is_some_and(|o| o.column != b.column)
                })
                .count();
            prop_assert!(changed <= 1);
            let moved = out.iter().find(|o| o.id == target);
            prop_assert_eq!(moved.map(|c| c.column), Some(Id::from_raw(column)));
        }
    }
}
