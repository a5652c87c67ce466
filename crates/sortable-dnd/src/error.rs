//! Error types for drag operations.

use crate::session::DragPhase;
use sortable_core::id::{ContainerId, DraggableId};

/// Error type for drag session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragError {
    /// A drag is already in progress on this context.
    SessionActive,
    /// The operation needs an active drag.
    NoActiveSession,
    /// The session cannot move between these phases.
    InvalidTransition { from: DragPhase, to: DragPhase },
    /// Only the primary pointer button starts a drag.
    NotPrimaryButton,
    /// Container was never registered.
    UnknownContainer(ContainerId),
    /// Container is disabled.
    ContainerDisabled(ContainerId),
    /// Draggable is not part of the container's items.
    UnknownDraggable(DraggableId),
    /// Hand-off target is already the active container.
    SameContainer(ContainerId),
}

impl std::fmt::Display for DragError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DragError::SessionActive => write!(f, "A drag session is already active"),
            DragError::NoActiveSession => write!(f, "No active drag session"),
            DragError::InvalidTransition { from, to } => {
                write!(f, "Invalid session transition {:?} -> {:?}", from, to)
            }
            DragError::NotPrimaryButton => write!(f, "Only the primary button starts a drag"),
            DragError::UnknownContainer(id) => write!(f, "Container {} not registered", id),
            DragError::ContainerDisabled(id) => write!(f, "Container {} is disabled", id),
            DragError::UnknownDraggable(id) => write!(f, "Draggable {} not found", id),
            DragError::SameContainer(id) => {
                write!(f, "Container {} already owns the drag", id)
            }
        }
    }
}

impl std::error::Error for DragError {}

/// Result type for drag operations.
pub type DragResult<T> = Result<T, DragError>;

/// Error type for placeholder bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderError {
    /// The container already holds a placeholder.
    AlreadyInserted(ContainerId),
}

impl std::fmt::Display for PlaceholderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceholderError::AlreadyInserted(id) => {
                write!(f, "Container {} already holds a placeholder", id)
            }
        }
    }
}

impl std::error::Error for PlaceholderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            DragError::SessionActive.to_string(),
            "A drag session is already active"
        );
        let err = DragError::InvalidTransition {
            from: DragPhase::Idle,
            to: DragPhase::Settling,
        };
        assert_eq!(err.to_string(), "Invalid session transition Idle -> Settling");
    }
}
