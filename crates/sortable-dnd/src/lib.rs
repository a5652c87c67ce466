//! Sortable DnD - headless drag-reflow engine
//!
//! This crate decides, frame by frame, where every item of a sortable list
//! should move while one of them is being dragged:
//! - Sibling displacement with read-then-write batching
//! - Animated placeholders reserving room for the lifted item
//! - Hand-off between containers of the same group
//! - Auto-scroll near the edges of the scroll container
//! - A settle animation and the final index report on release
//!
//! All layout reads and style writes go through [`LayoutHost`], so the engine
//! works against any view layer.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sortable_dnd::prelude::*;
//!
//! let mut ids = ContextIdAllocator::new();
//! let mut dnd = DragDropContext::new(&mut ids, DragDropConfig::default());
//! dnd.register_container(ContainerConfig::new("todo").group("board"), todo_node);
//! dnd.set_items(Id::new("todo"), vec![ItemEntry::new(1u64, card_node)]);
//! dnd.on_drag_end(|event| println!("dropped at {}", event.destination_idx));
//!
//! // Forward pointer input, then once per frame:
//! // dnd.update(&mut host, delta_time);
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod host;
pub mod intersection;
pub mod list;
pub mod measure;
pub mod placeholder;
pub mod reflow;
pub mod registry;
pub mod scheduler;
pub mod scroll;
pub mod session;
pub mod settle;
pub mod style;

pub use config::{ContainerConfig, DragDropConfig, ScrollFollowConfig};
pub use context::{DragDropContext, PointerButton, PointerDown};
pub use error::{DragError, DragResult, PlaceholderError};
pub use events::{DragEndEvent, DragOverEvent, DragStartEvent};
pub use host::{
    ComputedStyle, LayoutHost, NodeHandle, Overflow, PointerChannel, PositionKind, ScrollBehavior,
    ScrollRequest, ScrollTarget,
};
pub use list::{SortableItem, apply_drag_end, move_item, reorder};
pub use registry::{ContainerRegistry, ItemEntry};
pub use session::DragPhase;
pub use style::{InlineStyle, StyleKey, StyleProp, TimingFunction, Transition, TransitionProperty};

/// Everything a host binding usually needs.
pub mod prelude {
    pub use crate::{
        ContainerConfig, DragDropConfig, DragDropContext, DragEndEvent, DragPhase, ItemEntry,
        LayoutHost, NodeHandle, PointerDown, SortableItem, apply_drag_end,
    };
    pub use sortable_core::geometry::{Axis, Pointer, Rect};
    pub use sortable_core::id::{ContextIdAllocator, Id};
}
