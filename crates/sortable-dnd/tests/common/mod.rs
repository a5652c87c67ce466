//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use sortable_core::geometry::{Axis, Rect, Size};
use sortable_core::id::{ContainerId, ContextIdAllocator, DraggableId, Id};
use sortable_dnd::{
    ContainerConfig, DragDropConfig, DragDropContext, DragEndEvent, DragOverEvent, DragStartEvent,
    ItemEntry,
    NodeHandle, SortableItem,
};
use sortable_test_utils::MockLayoutHost;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub const FRAME: Duration = Duration::from_millis(16);
pub const TRANSITION: Duration = Duration::from_millis(200);
pub const ITEM: Size = Size::new(200.0, 40.0);

/// A card in a board, as the host application would store it.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: DraggableId,
    pub column: ContainerId,
}

impl Card {
    pub fn new(id: u64, column: &str) -> Self {
        Self {
            id: Id::from_raw(id),
            column: Id::new(column),
        }
    }
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

pub fn ids(cards: &[Card]) -> Vec<u64> {
    cards.iter().map(|c| c.id.as_u64()).collect()
}

/// A mounted board: host, context and recorded callbacks.
pub struct Board {
    pub host: MockLayoutHost,
    pub dnd: DragDropContext,
    pub started: Rc<RefCell<Vec<DragStartEvent>>>,
    pub ended: Rc<RefCell<Vec<DragEndEvent>>>,
    pub over: Rc<RefCell<Vec<DragOverEvent>>>,
    pub nodes: Vec<(u64, NodeHandle)>,
}

impl Board {
    pub fn new() -> Self {
        sortable_core::logging::init_with_filter("sortable_dnd=trace");
        let mut ids = ContextIdAllocator::new();
        let mut dnd = DragDropContext::new(&mut ids, DragDropConfig::default());

        let started = Rc::new(RefCell::new(Vec::new()));
        let ended = Rc::new(RefCell::new(Vec::new()));
        let over = Rc::new(RefCell::new(Vec::new()));
        let sink = started.clone();
        dnd.on_drag_start(move |event| sink.borrow_mut().push(*event));
        let sink = ended.clone();
        dnd.on_drag_end(move |event| sink.borrow_mut().push(*event));
        let sink = over.clone();
        dnd.on_drag_over(move |event| sink.borrow_mut().push(*event));

        Self {
            host: MockLayoutHost::new(),
            dnd,
            started,
            ended,
            over,
            nodes: Vec::new(),
        }
    }

    /// Add a column at `frame` holding items with the given ids.
    pub fn column(&mut self, config: ContainerConfig, frame: Rect, items: &[u64]) -> NodeHandle {
        let node = self.host.add_container(frame, config.axis);
        let entries = items
            .iter()
            .map(|id| {
                let size = match config.axis {
                    Axis::Vertical => ITEM,
                    Axis::Horizontal => Size::new(ITEM.height * 2.0, ITEM.height),
                };
                let item = self.host.add_item(node, size);
                self.nodes.push((*id, item));
                ItemEntry::new(*id, item)
            })
            .collect();
        let id = config.id;
        self.dnd.register_container(config, node);
        self.dnd.set_items(id, entries);
        node
    }

    pub fn node(&self, id: u64) -> NodeHandle {
        self.nodes
            .iter()
            .find(|(i, _)| *i == id)
            .map(|(_, n)| *n)
            .expect("unknown item")
    }

    pub fn update(&mut self, dt: Duration) {
        self.dnd.update(&mut self.host, dt);
    }

    /// Run updates until nothing is pending.
    pub fn settle_all(&mut self) {
        for _ in 0..64 {
            if self.dnd.scheduler().is_idle() {
                return;
            }
            self.update(TRANSITION);
        }
        panic!("scheduler never went idle");
    }

    pub fn last_end(&self) -> Option<DragEndEvent> {
        self.ended.borrow().last().copied()
    }
}
