//! The drag surface: wires sensors, session, registry and scheduler together.
//!
//! The host forwards pointer input and calls [`DragDropContext::update`] once
//! per frame. Everything the engine defers (debounced reflows, intersection
//! checks, placeholder animations, the settle animation) runs from there.
//!
//! # Example
//!
//! ```ignore
//! let mut ids = ContextIdAllocator::new();
//! let mut dnd = DragDropContext::new(&mut ids, DragDropConfig::default());
//! dnd.register_container(ContainerConfig::new("todo").group("board"), todo_node);
//! dnd.set_items(Id::new("todo"), items);
//! dnd.on_drag_end(move |event| pending.push(*event));
//!
//! // In the event loop
//! dnd.pointer_down(&mut host, PointerDown::primary(card, Id::new("todo"), pointer));
//! dnd.pointer_move(&mut host, pointer);
//! dnd.pointer_up(&mut host);
//! dnd.update(&mut host, dt);
//! ```

use crate::config::{ContainerConfig, DragDropConfig};
use crate::error::{DragError, DragResult};
use crate::events::{DragEndEvent, DragOverEvent, DragStartEvent};
use crate::host::{LayoutHost, NodeHandle, PointerChannel, PositionKind};
use crate::intersection::node_intersects;
use crate::measure::{NodeMetrics, measure_node, resolve_container_scroll, resolve_scroll_ancestor};
use crate::placeholder::{self, PlaceholderManager, RemovalMode};
use crate::reflow::{ReflowRequest, reflow};
use crate::registry::{ContainerEntry, ContainerRegistry, ItemEntry};
use crate::scheduler::{Scheduler, Task, TaskKey};
use crate::scroll;
use crate::session::{DragPhase, DragSession, SessionController, SessionStart};
use crate::settle::{commit_delay, destination, destination_index, settle_styles};
use crate::style::{
    DISPLACEMENT_STYLE_KEYS, LIFTED_STYLE_KEYS, StyleProp, TransitionProperty, remove_styles,
    set_styles,
};
use sortable_core::geometry::{Pointer, Rect};
use sortable_core::id::{ContainerId, ContextId, ContextIdAllocator, DraggableId};
use sortable_core::math::Vec2;
use sortable_core::profiling::profile_function;
use std::time::Duration;

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Auxiliary,
}

/// A pointer press on a draggable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerDown {
    pub draggable_id: DraggableId,
    pub container_id: ContainerId,
    pub pointer: Pointer,
    pub button: PointerButton,
}

impl PointerDown {
    /// Primary-button press.
    pub fn primary(
        draggable_id: impl Into<DraggableId>,
        container_id: impl Into<ContainerId>,
        pointer: Pointer,
    ) -> Self {
        Self {
            draggable_id: draggable_id.into(),
            container_id: container_id.into(),
            pointer,
            button: PointerButton::Primary,
        }
    }

    pub fn button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

type DragStartCallback = Box<dyn FnMut(&DragStartEvent)>;
type DragOverCallback = Box<dyn FnMut(&DragOverEvent)>;
type DragEndCallback = Box<dyn FnMut(&DragEndEvent)>;

/// One mounted drag surface.
pub struct DragDropContext {
    id: ContextId,
    config: DragDropConfig,
    registry: ContainerRegistry,
    controller: SessionController,
    placeholders: PlaceholderManager,
    scheduler: Scheduler,
    on_drag_start: Option<DragStartCallback>,
    on_drag_over: Option<DragOverCallback>,
    on_drag_end: Option<DragEndCallback>,
}

impl std::fmt::Debug for DragDropContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragDropContext")
            .field("id", &self.id)
            .field("phase", &self.controller.phase())
            .field("containers", &self.registry.len())
            .field("pending_tasks", &self.scheduler.pending())
            .finish()
    }
}

impl DragDropContext {
    pub fn new(ids: &mut ContextIdAllocator, config: DragDropConfig) -> Self {
        let id = ids.allocate();
        tracing::debug!("Creating drag context {}", id);
        Self {
            id,
            config,
            registry: ContainerRegistry::new(),
            controller: SessionController::new(id),
            placeholders: PlaceholderManager::new(),
            scheduler: Scheduler::new(),
            on_drag_start: None,
            on_drag_over: None,
            on_drag_end: None,
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn config(&self) -> &DragDropConfig {
        &self.config
    }

    pub fn phase(&self) -> DragPhase {
        self.controller.phase()
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_active()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.controller.session()
    }

    pub fn registry(&self) -> &ContainerRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn placeholders(&self) -> &PlaceholderManager {
        &self.placeholders
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    pub fn register_container(&mut self, config: ContainerConfig, node: NodeHandle) {
        self.registry.register(config, node);
    }

    /// Replace the ordered items of a container. Returns false if unknown.
    pub fn set_items(&mut self, container: ContainerId, items: Vec<ItemEntry>) -> bool {
        self.registry.set_items(container, items)
    }

    pub fn set_container_disabled(&mut self, container: ContainerId, disabled: bool) -> bool {
        self.registry.set_disabled(container, disabled)
    }

    pub fn unregister_container(&mut self, container: ContainerId) -> Option<ContainerEntry> {
        self.registry.unregister(container)
    }

    pub fn on_drag_start(&mut self, callback: impl FnMut(&DragStartEvent) + 'static) {
        self.on_drag_start = Some(Box::new(callback));
    }

    pub fn on_drag_over(&mut self, callback: impl FnMut(&DragOverEvent) + 'static) {
        self.on_drag_over = Some(Box::new(callback));
    }

    pub fn on_drag_end(&mut self, callback: impl FnMut(&DragEndEvent) + 'static) {
        self.on_drag_end = Some(Box::new(callback));
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Start a drag, or return why it could not start.
    ///
    /// Nothing is written to the host when this fails.
    pub fn try_pointer_down(&mut self, host: &mut dyn LayoutHost, down: PointerDown) -> DragResult<()> {
        if down.button != PointerButton::Primary {
            return Err(DragError::NotPrimaryButton);
        }
        if self.controller.is_active() {
            return Err(DragError::SessionActive);
        }

        let entry = self
            .registry
            .get(down.container_id)
            .ok_or(DragError::UnknownContainer(down.container_id))?;
        if !entry.is_enabled() {
            return Err(DragError::ContainerDisabled(down.container_id));
        }
        let source_idx = entry
            .index_of(down.draggable_id)
            .ok_or(DragError::UnknownDraggable(down.draggable_id))?;
        let lifted = entry.items[source_idx].node;
        let group_id = entry.group();

        let metrics = measure_node(host, lifted);
        let scroll_container = resolve_scroll_ancestor(host, lifted);

        let session = self.controller.begin(SessionStart {
            draggable_id: down.draggable_id,
            container_id: down.container_id,
            group_id,
            source_idx,
            lifted,
            occupied: metrics.occupied,
            pointer: down.pointer,
            scroll_container,
        })?;
        session.subscriptions.subscribe(host, PointerChannel::Move);
        session.subscriptions.subscribe(host, PointerChannel::Up);

        lift(host, lifted, &metrics, self.config.lifted_z_index);

        if let Some(callback) = self.on_drag_start.as_mut() {
            callback(&DragStartEvent {
                context_id: self.id,
                draggable_id: down.draggable_id,
                container_id: down.container_id,
                group_id,
                source_idx,
                pointer: down.pointer,
            });
        }

        self.activate_container(host, down.container_id, false);
        Ok(())
    }

    /// Start a drag. Returns false when the press was ignored.
    pub fn pointer_down(&mut self, host: &mut dyn LayoutHost, down: PointerDown) -> bool {
        match self.try_pointer_down(host, down) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!("{}: pointer down ignored: {}", self.id, err);
                false
            }
        }
    }

    /// Pointer moved; the lifted node is the reflow target.
    pub fn pointer_move(&mut self, host: &mut dyn LayoutHost, pointer: Pointer) -> bool {
        self.track_pointer(host, pointer, None)
    }

    /// Pointer moved over `target`, as reported by the host's hit test.
    pub fn pointer_move_over(
        &mut self,
        host: &mut dyn LayoutHost,
        pointer: Pointer,
        target: NodeHandle,
    ) -> bool {
        self.track_pointer(host, pointer, Some(target))
    }

    fn track_pointer(
        &mut self,
        host: &mut dyn LayoutHost,
        pointer: Pointer,
        target: Option<NodeHandle>,
    ) -> bool {
        if !self.controller.phase().is_dragging() {
            return false;
        }
        let Some(session) = self.controller.session_mut() else {
            return false;
        };
        if !session.subscriptions.is_subscribed(PointerChannel::Move) {
            return false;
        }

        session.last_pointer = pointer;
        session.last_target = target.unwrap_or(session.lifted);
        let lifted = session.lifted;
        let delta = pointer.delta_from(session.start_pointer);
        let (group, active) = (session.group_id, session.container_id);

        host.set_style(lifted, StyleProp::Transform(delta));

        self.scheduler
            .debounce(TaskKey::Reflow, Duration::ZERO, Task::Reflow);
        for candidate in self.registry.candidates(group, active) {
            let container = candidate.id();
            self.scheduler.debounce(
                TaskKey::Intersect(container),
                candidate.config.debounce,
                Task::Intersect { container },
            );
        }
        if self.config.scroll.enabled {
            self.scheduler
                .request_frame_keyed(TaskKey::ScrollFollow, Task::ScrollFollow { pointer });
        }
        true
    }

    /// Pointer released. Returns false when no drag was in progress.
    pub fn pointer_up(&mut self, host: &mut dyn LayoutHost) -> bool {
        if !self.controller.phase().is_dragging() {
            return false;
        }

        if let Some(session) = self.controller.session_mut() {
            session.subscriptions.unsubscribe_all(host);
        }
        self.scheduler.cancel(TaskKey::Reflow);
        self.scheduler.cancel(TaskKey::ScrollFollow);
        self.scheduler.cancel_intersections();

        let session = match self.controller.settle() {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!("{}: {}", self.id, err);
                return false;
            }
        };
        let last_insert = session.last_placeholder_insert;
        let transition = self
            .registry
            .get(session.container_id)
            .map(|c| c.config.transition)
            .unwrap_or_default();

        match commit_delay(self.scheduler.now(), last_insert, transition) {
            Some(delay) => {
                tracing::debug!("{}: commit deferred by {:?}", self.id, delay);
                self.scheduler.schedule(delay, Task::Settle);
            }
            None => self.settle(host),
        }
        true
    }

    // ------------------------------------------------------------------
    // Frame driver
    // ------------------------------------------------------------------

    /// Advance the clock by `dt` and run the work that became due.
    ///
    /// Animation-frame tasks run first, then timers in due order.
    pub fn update(&mut self, host: &mut dyn LayoutHost, dt: Duration) {
        profile_function!();
        sortable_core::profiling::new_frame();
        self.scheduler.advance(dt);

        for task in self.scheduler.take_frames() {
            self.run_task(host, task);
        }
        while let Some(task) = self.scheduler.pop_due() {
            self.run_task(host, task);
        }
    }

    /// Tear everything down without firing `on_drag_end`.
    pub fn unmount(&mut self, host: &mut dyn LayoutHost) {
        tracing::debug!("{}: unmount", self.id);

        for task in self.scheduler.drain() {
            match task {
                Task::RemoveNode { node } | Task::CollapsePlaceholder { node, .. } => {
                    host.remove_node(node)
                }
                Task::ClearDisplacement { nodes } => {
                    for node in nodes {
                        remove_styles(host, node, DISPLACEMENT_STYLE_KEYS);
                    }
                }
                _ => {}
            }
        }

        if let Some(session) = self.controller.session_mut() {
            session.subscriptions.unsubscribe_all(host);
        }
        self.placeholders.clear(host);
        for entry in self.registry.iter() {
            for node in entry.item_nodes() {
                remove_styles(host, node, DISPLACEMENT_STYLE_KEYS);
            }
        }
        if let Some(session) = self.controller.session() {
            remove_styles(host, session.lifted, LIFTED_STYLE_KEYS);
        }
        self.controller.reset(host);
    }

    fn run_task(&mut self, host: &mut dyn LayoutHost, task: Task) {
        match task {
            Task::Reflow => {
                if let Some(session) = self.controller.session() {
                    let (target, pointer) = (session.last_target, session.last_pointer);
                    self.run_reflow(host, target, pointer);
                }
            }
            Task::Intersect { container } => self.hand_off(host, container),
            Task::ScrollFollow { pointer } => {
                if self.controller.phase().is_dragging()
                    && let Some(session) = self.controller.session()
                {
                    scroll::follow(host, session.scroll_container, pointer, &self.config.scroll);
                }
            }
            Task::OpenPlaceholder {
                node,
                size,
                transition,
            } => placeholder::open(host, node, size, transition),
            Task::CollapsePlaceholder { node, transition } => {
                placeholder::collapse(host, &mut self.scheduler, node, transition)
            }
            Task::RemoveNode { node } => host.remove_node(node),
            Task::ClearDisplacement { nodes } => self.clear_displacement(host, &nodes),
            Task::Settle => self.settle(host),
            Task::Complete => self.complete(host),
        }
    }

    // ------------------------------------------------------------------
    // Containers
    // ------------------------------------------------------------------

    /// Give `container` a placeholder and reflow its items around the lifted node.
    fn activate_container(&mut self, host: &mut dyn LayoutHost, container: ContainerId, opening: bool) {
        let Some(entry) = self.registry.get(container) else {
            return;
        };
        let (node, config) = (entry.node, entry.config);
        let Some(session) = self.controller.session_mut() else {
            return;
        };

        match self.placeholders.insert(
            host,
            &mut self.scheduler,
            container,
            node,
            session.occupied,
            opening,
            config.transition_for(TransitionProperty::empty()),
        ) {
            Ok(_) if opening => session.last_placeholder_insert = Some(self.scheduler.now()),
            Ok(_) => {}
            Err(err) => tracing::debug!("{}: {}", self.id, err),
        }

        let (lifted, pointer) = (session.lifted, session.last_pointer);
        self.run_reflow(host, lifted, pointer);
    }

    fn run_reflow(&mut self, host: &mut dyn LayoutHost, target: NodeHandle, pointer: Pointer) {
        if !self.controller.phase().is_dragging() {
            return;
        }
        let Some(session) = self.controller.session_mut() else {
            return;
        };
        let Some(entry) = self.registry.get(session.container_id) else {
            return;
        };

        let siblings: Vec<NodeHandle> = entry.item_nodes().collect();
        let outcome = reflow(
            host,
            &ReflowRequest {
                axis: entry.config.axis,
                target,
                pointer,
                siblings: &siblings,
                lifted: session.lifted,
                occupied: session.occupied,
                transition: entry.config.transition_for(TransitionProperty::TRANSFORM),
            },
        );
        session.nearest = outcome.nearest;

        if let Some(callback) = self.on_drag_over.as_mut() {
            callback(&DragOverEvent {
                draggable_id: session.draggable_id,
                container_id: session.container_id,
                group_id: session.group_id,
                nearest: outcome.nearest,
                target,
            });
        }
    }

    /// Move the drag into `container` if the lifted node is over it.
    fn hand_off(&mut self, host: &mut dyn LayoutHost, container: ContainerId) {
        if !self.controller.phase().is_dragging() {
            return;
        }
        let Some(session) = self.controller.session() else {
            return;
        };
        let Some(entry) = self.registry.get(container) else {
            return;
        };
        if entry.group() != session.group_id
            || !entry.is_enabled()
            || entry.id() == session.container_id
        {
            return;
        }
        if !node_intersects(host, session.lifted, entry.node) {
            return;
        }

        let lifted = session.lifted;
        let scroll_container = resolve_container_scroll(host, entry.node);
        let previous = match self.controller.intersect(container, scroll_container) {
            Ok(previous) => previous,
            Err(err) => {
                tracing::debug!("{}: hand-off skipped: {}", self.id, err);
                return;
            }
        };

        self.placeholders
            .remove(host, &mut self.scheduler, previous, RemovalMode::Collapse);
        if let Some(old) = self.registry.get(previous) {
            let nodes: Vec<NodeHandle> = old.item_nodes().filter(|n| *n != lifted).collect();
            send_back(host, &mut self.scheduler, nodes, old.config.transition);
        }

        self.activate_container(host, container, true);
    }

    /// Strip displacement styles, leaving the container that owns the drag alone.
    fn clear_displacement(&self, host: &mut dyn LayoutHost, nodes: &[NodeHandle]) {
        let active = self
            .controller
            .session()
            .filter(|_| self.controller.phase().is_dragging())
            .and_then(|s| self.registry.get(s.container_id));

        for node in nodes {
            if active.is_some_and(|c| c.item_nodes().any(|n| n == *node)) {
                continue;
            }
            remove_styles(host, *node, DISPLACEMENT_STYLE_KEYS);
        }
    }

    // ------------------------------------------------------------------
    // Settle
    // ------------------------------------------------------------------

    /// Animate the lifted node to its resting place, or complete right away.
    fn settle(&mut self, host: &mut dyn LayoutHost) {
        profile_function!();
        if self.controller.phase() != DragPhase::Settling {
            return;
        }
        let Some(session) = self.controller.session() else {
            return;
        };
        let Some(entry) = self.registry.get(session.container_id) else {
            tracing::warn!("{}: active container {} is gone", self.id, session.container_id);
            self.complete(host);
            return;
        };

        // Reads
        let lifted_style = host.computed_style(session.lifted);
        let container_rect = host.bounding_rect(entry.node);
        let padding = host.computed_style(entry.node).padding;
        let nearest_rect = session.nearest.map(|node| host.bounding_rect(node));

        if !lifted_style.has_transform() {
            self.complete(host);
            return;
        }

        let resting = destination(
            entry.config.axis,
            &container_rect,
            &padding,
            nearest_rect.as_ref(),
            &lifted_style.margin,
        );
        let transition = entry.config.transition_for(
            TransitionProperty::TRANSFORM | TransitionProperty::TOP | TransitionProperty::LEFT,
        );
        tracing::debug!("{}: settling {} at {:?}", self.id, session.lifted, resting);

        // Writes
        set_styles(host, session.lifted, settle_styles(resting, transition));
        self.scheduler.schedule(entry.config.transition, Task::Complete);
    }

    /// Report the drop and restore every node the drag touched.
    fn complete(&mut self, host: &mut dyn LayoutHost) {
        if self.controller.phase() != DragPhase::Settling {
            return;
        }
        let Some(session) = self.controller.session() else {
            return;
        };
        let lifted = session.lifted;
        let entry = self.registry.get(session.container_id);

        // Reads
        let item_nodes: Vec<NodeHandle> = entry.map(|e| e.item_nodes().collect()).unwrap_or_default();
        let destination_idx = match entry {
            Some(entry) => {
                let lifted_rect = host.bounding_rect(lifted);
                let rects: Vec<Rect> = item_nodes
                    .iter()
                    .filter(|n| **n != lifted)
                    .map(|n| host.bounding_rect(*n))
                    .collect();
                destination_index(entry.config.axis, &lifted_rect, &rects)
            }
            None => 0,
        };

        let event = DragEndEvent {
            draggable_id: session.draggable_id,
            container_id: session.container_id,
            group_id: session.group_id,
            source_container_id: session.origin_container_id,
            source_idx: session.source_idx,
            destination_idx,
            is_moving: session.is_moving(),
            target: lifted,
        };

        // Writes
        self.placeholders.remove(
            host,
            &mut self.scheduler,
            event.container_id,
            RemovalMode::Instant,
        );
        for node in &item_nodes {
            remove_styles(host, *node, DISPLACEMENT_STYLE_KEYS);
        }
        remove_styles(host, lifted, LIFTED_STYLE_KEYS);

        tracing::debug!(
            "{}: drop of {} into {} at {} (moving: {})",
            self.id,
            event.draggable_id,
            event.container_id,
            event.destination_idx,
            event.is_moving
        );
        if let Some(callback) = self.on_drag_end.as_mut() {
            callback(&event);
        }
        self.controller.reset(host);
    }
}

/// Take `node` out of flow at its current place, above everything else.
fn lift(host: &mut dyn LayoutHost, node: NodeHandle, metrics: &NodeMetrics, z_index: i32) {
    let rect = metrics.rect;
    set_styles(
        host,
        node,
        [
            StyleProp::Position(PositionKind::Fixed),
            StyleProp::ZIndex(z_index),
            StyleProp::Top(rect.top() - metrics.margin.top),
            StyleProp::Left(rect.left() - metrics.margin.left),
            StyleProp::Width(rect.width),
            StyleProp::Height(rect.height),
            StyleProp::TransformOrigin(Vec2::ZERO),
            StyleProp::Transition(None),
        ],
    );
}

/// Animate displaced items back into flow, then drop their styles.
fn send_back(
    host: &mut dyn LayoutHost,
    scheduler: &mut Scheduler,
    nodes: Vec<NodeHandle>,
    duration: Duration,
) {
    if nodes.is_empty() {
        return;
    }
    for node in &nodes {
        host.set_style(*node, StyleProp::Transform(Vec2::ZERO));
    }
    scheduler.schedule(duration, Task::ClearDisplacement { nodes });
}
