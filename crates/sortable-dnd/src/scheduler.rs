//! Deterministic stand-in for the UI event loop.
//!
//! The engine never sleeps or spawns. Deferred work is recorded as plain
//! [`Task`] data and handed back to the context when the host advances the
//! clock through [`DragDropContext::update`](crate::context::DragDropContext::update).
//!
//! - Animation-frame tasks run at the start of the next update.
//! - Timers run once due, ordered by `(due, sequence)`.
//! - Keyed tasks occupy one slot per key: scheduling the key again replaces
//!   the pending task (debounce), and [`Scheduler::cancel`] drops it.

use crate::host::NodeHandle;
use crate::style::Transition;
use sortable_core::geometry::{Pointer, Size};
use sortable_core::id::ContainerId;
use std::time::Duration;

/// Slot of a debounced or coalesced task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    Reflow,
    Intersect(ContainerId),
    ScrollFollow,
}

/// Deferred engine work.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Recompute displacement in the active container.
    Reflow,
    /// Test the lifted node against one candidate container.
    Intersect { container: ContainerId },
    /// Auto-scroll step for the latest pointer.
    ScrollFollow { pointer: Pointer },
    /// Second half of an opening placeholder insert.
    OpenPlaceholder {
        node: NodeHandle,
        size: Size,
        transition: Transition,
    },
    /// Second half of a placeholder collapse.
    CollapsePlaceholder {
        node: NodeHandle,
        transition: Transition,
    },
    RemoveNode { node: NodeHandle },
    /// Drop displacement styles once the backward transition is over.
    ClearDisplacement { nodes: Vec<NodeHandle> },
    /// Pointer-up that had to wait for a placeholder animation.
    Settle,
    /// End of the settle animation.
    Complete,
}

#[derive(Debug, Clone)]
struct Timer {
    due: Duration,
    seq: u64,
    key: Option<TaskKey>,
    task: Task,
}

#[derive(Debug, Clone)]
struct FrameTask {
    key: Option<TaskKey>,
    task: Task,
}

/// Logical clock plus queues of pending frame tasks and timers.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    seq: u64,
    timers: Vec<Timer>,
    frames: Vec<FrameTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Run `task` once `delay` has elapsed.
    pub fn schedule(&mut self, delay: Duration, task: Task) {
        let seq = self.next_seq();
        self.timers.push(Timer {
            due: self.now + delay,
            seq,
            key: None,
            task,
        });
    }

    /// Run `task` after `delay`, replacing any pending task with the same key.
    pub fn debounce(&mut self, key: TaskKey, delay: Duration, task: Task) {
        self.timers.retain(|t| t.key != Some(key));
        let seq = self.next_seq();
        self.timers.push(Timer {
            due: self.now + delay,
            seq,
            key: Some(key),
            task,
        });
    }

    /// Run `task` at the start of the next update.
    pub fn request_frame(&mut self, task: Task) {
        self.frames.push(FrameTask { key: None, task });
    }

    /// Like [`request_frame`](Self::request_frame), coalescing by key.
    ///
    /// A pending task with the same key is updated in place.
    pub fn request_frame_keyed(&mut self, key: TaskKey, task: Task) {
        if let Some(pending) = self.frames.iter_mut().find(|f| f.key == Some(key)) {
            pending.task = task;
        } else {
            self.frames.push(FrameTask {
                key: Some(key),
                task,
            });
        }
    }

    /// Drop pending work under `key`.
    pub fn cancel(&mut self, key: TaskKey) {
        self.timers.retain(|t| t.key != Some(key));
        self.frames.retain(|f| f.key != Some(key));
    }

    /// Drop every pending intersection check.
    pub fn cancel_intersections(&mut self) {
        let is_intersect = |key: &Option<TaskKey>| matches!(key, Some(TaskKey::Intersect(_)));
        self.timers.retain(|t| !is_intersect(&t.key));
        self.frames.retain(|f| !is_intersect(&f.key));
    }

    pub fn is_pending(&self, key: TaskKey) -> bool {
        self.timers.iter().any(|t| t.key == Some(key)) || self.frames.iter().any(|f| f.key == Some(key))
    }

    /// Advance the clock by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }

    /// Take the tasks queued for this frame.
    ///
    /// Frames requested while these run land in the next update.
    pub fn take_frames(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.frames)
            .into_iter()
            .map(|f| f.task)
            .collect()
    }

    /// Pop the earliest due timer.
    pub fn pop_due(&mut self) -> Option<Task> {
        let now = self.now;
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;
        Some(self.timers.swap_remove(index).task)
    }

    /// Remove everything still pending: frame tasks first, then timers in
    /// due order.
    pub fn drain(&mut self) -> Vec<Task> {
        let mut timers = std::mem::take(&mut self.timers);
        timers.sort_by_key(|t| (t.due, t.seq));
        self.take_frames()
            .into_iter()
            .chain(timers.into_iter().map(|t| t.task))
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.timers.len() + self.frames.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }
}
