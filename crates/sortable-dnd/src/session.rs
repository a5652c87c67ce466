//! The drag session record and its lifecycle.

use crate::error::{DragError, DragResult};
use crate::host::{LayoutHost, NodeHandle, PointerChannel, ScrollTarget};
use sortable_core::geometry::{Pointer, Size};
use sortable_core::id::{ContainerId, ContextId, DraggableId, GroupId};
use std::time::Duration;

/// Lifecycle phase of a drag.
///
/// ```text
/// Idle -> Dragging -> (Intersected)? -> Settling -> Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    /// The drag was handed off to another container at least once.
    Intersected,
    Settling,
}

impl DragPhase {
    /// Phases in which sensors still run.
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragPhase::Dragging | DragPhase::Intersected)
    }
}

/// Global listeners held by a session.
///
/// Each subscription is removed from the list before the host is told, so
/// tearing down twice never unsubscribes twice.
#[derive(Debug, Default)]
pub struct Subscriptions {
    active: Vec<PointerChannel>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, host: &mut dyn LayoutHost, channel: PointerChannel) {
        if self.active.contains(&channel) {
            return;
        }
        self.active.push(channel);
        host.add_listener(channel);
    }

    pub fn unsubscribe_all(&mut self, host: &mut dyn LayoutHost) {
        while let Some(channel) = self.active.pop() {
            host.remove_listener(channel);
        }
    }

    pub fn is_subscribed(&self, channel: PointerChannel) -> bool {
        self.active.contains(&channel)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Everything captured when a drag begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionStart {
    pub draggable_id: DraggableId,
    pub container_id: ContainerId,
    pub group_id: GroupId,
    pub source_idx: usize,
    pub lifted: NodeHandle,
    pub occupied: Size,
    pub pointer: Pointer,
    pub scroll_container: ScrollTarget,
}

/// State of the drag in progress.
#[derive(Debug)]
pub struct DragSession {
    pub context_id: ContextId,
    pub draggable_id: DraggableId,
    /// Container that currently owns the drag.
    pub container_id: ContainerId,
    pub group_id: GroupId,
    /// Container the drag started in.
    pub origin_container_id: ContainerId,
    pub source_idx: usize,
    pub lifted: NodeHandle,
    /// Room the lifted node takes, margins included.
    pub occupied: Size,
    pub start_pointer: Pointer,
    pub last_pointer: Pointer,
    /// Node under the pointer at the last move; the lifted node by default.
    pub last_target: NodeHandle,
    pub scroll_container: ScrollTarget,
    pub intersected: bool,
    pub nearest: Option<NodeHandle>,
    /// When an animated placeholder was last inserted.
    pub last_placeholder_insert: Option<Duration>,
    pub subscriptions: Subscriptions,
}

impl DragSession {
    pub fn is_moving(&self) -> bool {
        self.container_id != self.origin_container_id
    }
}

/// Owns the optional session and enforces the phase transitions.
#[derive(Debug)]
pub struct SessionController {
    context_id: ContextId,
    phase: DragPhase,
    session: Option<DragSession>,
}

impl SessionController {
    pub fn new(context_id: ContextId) -> Self {
        Self {
            context_id,
            phase: DragPhase::Idle,
            session: None,
        }
    }

    pub fn context_id(&self) -> ContextId {
        self.context_id
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != DragPhase::Idle
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut DragSession> {
        self.session.as_mut()
    }

    /// Idle -> Dragging.
    pub fn begin(&mut self, start: SessionStart) -> DragResult<&mut DragSession> {
        if self.phase != DragPhase::Idle {
            return Err(DragError::SessionActive);
        }

        tracing::debug!(
            "{}: drag of {} started in {}",
            self.context_id,
            start.draggable_id,
            start.container_id
        );
        self.phase = DragPhase::Dragging;
        Ok(self.session.insert(DragSession {
            context_id: self.context_id,
            draggable_id: start.draggable_id,
            container_id: start.container_id,
            group_id: start.group_id,
            origin_container_id: start.container_id,
            source_idx: start.source_idx,
            lifted: start.lifted,
            occupied: start.occupied,
            start_pointer: start.pointer,
            last_pointer: start.pointer,
            last_target: start.lifted,
            scroll_container: start.scroll_container,
            intersected: false,
            nearest: None,
            last_placeholder_insert: None,
            subscriptions: Subscriptions::new(),
        }))
    }

    /// Dragging/Intersected -> Intersected, switching the active container.
    ///
    /// Returns the container that lost the drag.
    pub fn intersect(
        &mut self,
        container: ContainerId,
        scroll_container: ScrollTarget,
    ) -> DragResult<ContainerId> {
        if !self.phase.is_dragging() {
            return Err(self.invalid(DragPhase::Intersected));
        }
        let session = self.session.as_mut().ok_or(DragError::NoActiveSession)?;
        if session.container_id == container {
            return Err(DragError::SameContainer(container));
        }

        let previous = session.container_id;
        session.container_id = container;
        session.scroll_container = scroll_container;
        session.intersected = true;
        session.nearest = None;
        self.phase = DragPhase::Intersected;
        tracing::debug!("{}: drag handed off {} -> {}", self.context_id, previous, container);
        Ok(previous)
    }

    /// Dragging/Intersected -> Settling.
    pub fn settle(&mut self) -> DragResult<&mut DragSession> {
        if !self.phase.is_dragging() {
            return Err(self.invalid(DragPhase::Settling));
        }
        self.phase = DragPhase::Settling;
        self.session.as_mut().ok_or(DragError::NoActiveSession)
    }

    /// Back to Idle, releasing any listeners still held.
    pub fn reset(&mut self, host: &mut dyn LayoutHost) -> Option<DragSession> {
        let mut session = self.session.take();
        if let Some(session) = session.as_mut() {
            session.subscriptions.unsubscribe_all(host);
        }
        if self.phase != DragPhase::Idle {
            tracing::debug!("{}: session reset", self.context_id);
        }
        self.phase = DragPhase::Idle;
        session
    }

    fn invalid(&self, to: DragPhase) -> DragError {
        DragError::InvalidTransition {
            from: self.phase,
            to,
        }
    }
}
