//! Configuration for containers and the drag context.

use crate::style::{TimingFunction, Transition, TransitionProperty};
use sortable_core::geometry::Axis;
use sortable_core::id::{ContainerId, GroupId};
use std::time::Duration;

/// Default transition used for displacement, placeholder and settle animations.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(200);

/// Default z-index of the lifted node.
pub const DEFAULT_LIFTED_Z_INDEX: i32 = 100_000;

/// Configuration of one container (drop zone).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerConfig {
    pub id: ContainerId,
    /// Only containers of the same group exchange items.
    pub group: GroupId,
    pub axis: Axis,
    pub disabled: bool,
    /// Duration of every animation this container plays.
    pub transition: Duration,
    pub timing: TimingFunction,
    /// Delay before the intersection check runs after a pointer move.
    pub debounce: Duration,
}

impl ContainerConfig {
    /// A vertical container in its own group.
    pub fn new(id: impl Into<ContainerId>) -> Self {
        let id = id.into();
        Self {
            id,
            group: id,
            axis: Axis::Vertical,
            disabled: false,
            transition: DEFAULT_TRANSITION,
            timing: TimingFunction::default(),
            debounce: Duration::ZERO,
        }
    }

    pub fn vertical(id: impl Into<ContainerId>) -> Self {
        Self::new(id)
    }

    pub fn horizontal(id: impl Into<ContainerId>) -> Self {
        Self::new(id).axis(Axis::Horizontal)
    }

    pub fn group(mut self, group: impl Into<GroupId>) -> Self {
        self.group = group.into();
        self
    }

    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn transition(mut self, duration: Duration) -> Self {
        self.transition = duration;
        self
    }

    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Transition over `properties` with this container's duration and timing.
    pub fn transition_for(&self, properties: TransitionProperty) -> Transition {
        Transition::new(properties, self.transition, self.timing)
    }
}

/// Auto-scroll settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFollowConfig {
    pub enabled: bool,
    /// Distance from a visible edge at which scrolling starts.
    pub edge_margin: f32,
    /// Pixels scrolled per frame.
    pub velocity: f32,
}

impl Default for ScrollFollowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            edge_margin: 40.0,
            velocity: 20.0,
        }
    }
}

impl ScrollFollowConfig {
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn edge_margin(mut self, margin: f32) -> Self {
        self.edge_margin = margin;
        self
    }

    pub fn velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }
}

/// Settings for a whole drag surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragDropConfig {
    pub scroll: ScrollFollowConfig,
    pub lifted_z_index: i32,
}

impl Default for DragDropConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollFollowConfig::default(),
            lifted_z_index: DEFAULT_LIFTED_Z_INDEX,
        }
    }
}

impl DragDropConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(mut self, scroll: ScrollFollowConfig) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn lifted_z_index(mut self, z_index: i32) -> Self {
        self.lifted_z_index = z_index;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_defaults() {
        let config = ContainerConfig::new("todo");
        assert_eq!(config.group, config.id);
        assert_eq!(config.axis, Axis::Vertical);
        assert_eq!(config.transition, Duration::from_millis(200));
        assert_eq!(config.timing, TimingFunction::EaseInOut);
        assert_eq!(config.debounce, Duration::ZERO);
        assert!(!config.disabled);
    }

    #[test]
    fn builder_chains() {
        let config = ContainerConfig::horizontal("row")
            .group("board")
            .transition(Duration::from_millis(300))
            .debounce(Duration::from_millis(16));
        assert!(config.axis.is_horizontal());
        assert_eq!(config.group, GroupId::new("board"));
        assert_eq!(
            config.transition_for(TransitionProperty::TRANSFORM).to_string(),
            "transform 300ms ease-in-out"
        );
    }

    #[test]
    fn drag_drop_defaults() {
        let config = DragDropConfig::default();
        assert_eq!(config.lifted_z_index, 100_000);
        assert_eq!(config.scroll.edge_margin, 40.0);
        assert_eq!(config.scroll.velocity, 20.0);
    }
}
