//! Sibling displacement for a moving target.
//!
//! A reflow pass reads the target rect and every sibling rect first, plans
//! the displacement of each sibling without touching the host, and only then
//! issues the style writes.

use crate::host::{LayoutHost, NodeHandle};
use crate::style::{StyleKey, StyleProp, Transition};
use sortable_core::geometry::{Axis, Pointer, Rect, Size, resolve_threshold, round_px};
use sortable_core::math::Vec2;
use sortable_core::profiling::profile_function;

/// What happens to one sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingMove {
    /// Shift by one occupied unit along the axis to make room.
    Shift,
    /// Stay in flow; the sibling is a nearest-neighbour candidate.
    Stay,
}

/// Decisions for every sibling plus the chosen nearest neighbour.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReflowPlan {
    pub decisions: Vec<(NodeHandle, SiblingMove)>,
    /// Stationary sibling whose leading edge is closest before the threshold.
    pub nearest: Option<NodeHandle>,
}

impl ReflowPlan {
    pub fn shifted(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.decisions
            .iter()
            .filter(|(_, m)| *m == SiblingMove::Shift)
            .map(|(node, _)| *node)
    }
}

/// Plan a reflow pass from already measured sibling rects.
///
/// A sibling whose rounded leading edge is at or after the threshold shifts.
/// So does one exactly one pixel before it, which absorbs rounding between
/// the target and its neighbours. Every other sibling stays and is scored by
/// `threshold - leading`; the lowest score wins, the first one on ties.
pub fn plan_reflow(axis: Axis, threshold: Vec2, siblings: &[(NodeHandle, Rect)]) -> ReflowPlan {
    let threshold = axis.main(threshold);
    let mut plan = ReflowPlan {
        decisions: Vec::with_capacity(siblings.len()),
        nearest: None,
    };
    let mut minimal_diff = f32::INFINITY;

    for (node, rect) in siblings {
        let leading = round_px(axis.leading(rect));
        if threshold <= leading || threshold - leading == 1.0 {
            plan.decisions.push((*node, SiblingMove::Shift));
        } else {
            plan.decisions.push((*node, SiblingMove::Stay));
            let diff = round_px(threshold - leading);
            if diff < minimal_diff {
                minimal_diff = diff;
                plan.nearest = Some(*node);
            }
        }
    }

    plan
}

/// Inputs of one reflow pass.
#[derive(Debug, Clone, Copy)]
pub struct ReflowRequest<'a> {
    pub axis: Axis,
    /// Node the threshold is taken from, usually the lifted node itself.
    pub target: NodeHandle,
    pub pointer: Pointer,
    /// Item nodes of the active container in render order.
    pub siblings: &'a [NodeHandle],
    /// Excluded from `siblings`.
    pub lifted: NodeHandle,
    pub occupied: Size,
    /// Transition applied to shifted siblings.
    pub transition: Transition,
}

/// Result of one reflow pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflowOutcome {
    pub nearest: Option<NodeHandle>,
    pub target_rect: Rect,
    pub shifted: usize,
}

/// Run a reflow pass against the host.
pub fn reflow(host: &mut dyn LayoutHost, request: &ReflowRequest<'_>) -> ReflowOutcome {
    profile_function!();

    // Reads
    let target_rect = host.bounding_rect(request.target);
    let threshold = resolve_threshold(&target_rect, request.pointer, host.viewport());
    let measured: Vec<(NodeHandle, Rect)> = request
        .siblings
        .iter()
        .filter(|node| **node != request.lifted)
        .map(|node| (*node, host.bounding_rect(*node)))
        .collect();

    let plan = plan_reflow(request.axis, threshold, &measured);

    // Writes
    let shift = request.axis.offset(request.axis.extent(request.occupied));
    let mut shifted = 0;
    for (node, decision) in &plan.decisions {
        match decision {
            SiblingMove::Shift => {
                host.set_style(*node, StyleProp::Transition(Some(request.transition)));
                host.set_style(*node, StyleProp::Transform(shift));
                shifted += 1;
            }
            SiblingMove::Stay => host.remove_style(*node, StyleKey::Transform),
        }
    }

    tracing::trace!(
        "reflow: threshold {:?}, {} of {} siblings shifted, nearest {:?}",
        threshold,
        shifted,
        plan.decisions.len(),
        plan.nearest
    );

    ReflowOutcome {
        nearest: plan.nearest,
        target_rect,
        shifted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn column(tops: &[f32]) -> Vec<(NodeHandle, Rect)> {
        tops.iter()
            .enumerate()
            .map(|(i, top)| (NodeHandle(i as u64), Rect::new(0.0, *top, 100.0, 40.0)))
            .collect()
    }

    #[test]
    fn siblings_at_or_after_threshold_shift() {
        let plan = plan_reflow(Axis::Vertical, Vec2::new(0.0, 80.0), &column(&[0.0, 40.0, 80.0, 120.0]));
        let moves: Vec<_> = plan.decisions.iter().map(|(_, m)| *m).collect();
        assert_eq!(
            moves,
            vec![
                SiblingMove::Stay,
                SiblingMove::Stay,
                SiblingMove::Shift,
                SiblingMove::Shift
            ]
        );
        assert_eq!(plan.nearest, Some(NodeHandle(1)));
    }

    #[test]
    fn one_pixel_tolerance() {
        let plan = plan_reflow(Axis::Vertical, Vec2::new(0.0, 41.0), &column(&[0.0, 40.0]));
        assert_eq!(plan.decisions[1].1, SiblingMove::Shift);
        assert_eq!(plan.nearest, Some(NodeHandle(0)));

        let plan = plan_reflow(Axis::Vertical, Vec2::new(0.0, 42.0), &column(&[0.0, 40.0]));
        assert_eq!(plan.decisions[1].1, SiblingMove::Stay);
        assert_eq!(plan.nearest, Some(NodeHandle(1)));
    }

    #[test]
    fn leading_edges_are_rounded() {
        let plan = plan_reflow(Axis::Vertical, Vec2::new(0.0, 40.0), &column(&[39.6]));
        assert_eq!(plan.decisions[0].1, SiblingMove::Shift);
    }

    #[test]
    fn horizontal_uses_left_edges() {
        let siblings = vec![
            (NodeHandle(0), Rect::new(0.0, 500.0, 50.0, 50.0)),
            (NodeHandle(1), Rect::new(50.0, 500.0, 50.0, 50.0)),
        ];
        let plan = plan_reflow(Axis::Horizontal, Vec2::new(50.0, 0.0), &siblings);
        assert_eq!(plan.nearest, Some(NodeHandle(0)));
        assert_eq!(plan.shifted().collect::<Vec<_>>(), vec![NodeHandle(1)]);
    }

    #[test]
    fn ties_keep_first_candidate() {
        let plan = plan_reflow(Axis::Vertical, Vec2::new(0.0, 100.0), &column(&[20.0, 20.0]));
        assert_eq!(plan.nearest, Some(NodeHandle(0)));
    }

    proptest! {
        #[test]
        fn nearest_is_minimal_stationary(
            tops in prop::collection::vec(-200i32..800, 0..16),
            threshold in -200i32..800,
        ) {
            let tops: Vec<f32> = tops.into_iter().map(|t| t as f32).collect();
            let siblings = column(&tops);
            let plan = plan_reflow(Axis::Vertical, Vec2::new(0.0, threshold as f32), &siblings);
            let threshold = threshold as f32;

            let stationary: Vec<(NodeHandle, f32)> = plan
                .decisions
                .iter()
                .zip(&tops)
                .filter(|((_, m), _)| *m == SiblingMove::Stay)
                .map(|((node, _), top)| (*node, threshold - top))
                .collect();

            for (_, diff) in &stationary {
                prop_assert!(*diff > 1.0);
            }

            match plan.nearest {
                None => prop_assert!(stationary.is_empty()),
                Some(nearest) => {
                    let best = stationary
                        .iter()
                        .map(|(_, d)| *d)
                        .fold(f32::INFINITY, f32::min);
                    let chosen = stationary.iter().find(|(n, _)| *n == nearest).map(|(_, d)| *d);
                    prop_assert_eq!(chosen, Some(best));
                }
            }
        }
    }
}
