//! Auto-scroll while the pointer is near the edge of the scroll container.

use crate::config::ScrollFollowConfig;
use crate::host::{LayoutHost, ScrollBehavior, ScrollRequest, ScrollTarget};
use crate::measure::visible_rect;
use sortable_core::geometry::{Pointer, Rect};
use sortable_core::math::Vec2;

/// Scroll delta for one frame.
///
/// On each axis the pointer within `edge_margin` of a visible edge, or past
/// it, scrolls by `velocity` toward that edge.
pub fn scroll_step(pointer: Pointer, visible: &Rect, config: &ScrollFollowConfig) -> Vec2 {
    let step = |p: f32, lo: f32, hi: f32| {
        if p < lo + config.edge_margin {
            -config.velocity
        } else if p > hi - config.edge_margin {
            config.velocity
        } else {
            0.0
        }
    };

    Vec2::new(
        step(pointer.client_x, visible.left(), visible.right()),
        step(pointer.client_y, visible.top(), visible.bottom()),
    )
}

/// Scroll `target` one step. Returns whether a scroll was requested.
pub fn follow(
    host: &mut dyn LayoutHost,
    target: ScrollTarget,
    pointer: Pointer,
    config: &ScrollFollowConfig,
) -> bool {
    if !config.enabled {
        return false;
    }

    let visible = visible_rect(host, target);
    let step = scroll_step(pointer, &visible, config);
    if step == Vec2::ZERO {
        return false;
    }

    let offset = host.scroll_offset(target);
    let next = (offset + step).max(Vec2::ZERO);
    if next == offset {
        return false;
    }

    let request = ScrollRequest {
        top: (step.y != 0.0).then_some(next.y),
        left: (step.x != 0.0).then_some(next.x),
        behavior: ScrollBehavior::Smooth,
    };
    tracing::trace!("scroll-follow {:?} by {:?}", target, step);
    host.scroll_to(target, request);
    true
}
