//! Final placement of the lifted node on release.

use crate::style::{StyleProp, Transition};
use sortable_core::geometry::{Axis, Edges, Rect, round_px};
use sortable_core::math::Vec2;
use std::time::Duration;

/// Where the lifted node comes to rest, as fixed `left`/`top` values.
///
/// Along the axis it lands right after the nearest neighbour's trailing edge
/// plus its own leading margin, or at the container's leading content edge
/// when there is no neighbour. The cross axis always uses the content edge.
pub fn destination(
    axis: Axis,
    container: &Rect,
    padding: &Edges,
    nearest: Option<&Rect>,
    margin: &Edges,
) -> Vec2 {
    let content_top = round_px(container.top() + padding.top);
    let content_left = round_px(container.left() + padding.left);

    match axis {
        Axis::Vertical => {
            let top = nearest
                .map(|rect| round_px(rect.bottom() + margin.top))
                .unwrap_or(content_top);
            Vec2::new(content_left, top)
        }
        Axis::Horizontal => {
            let left = nearest
                .map(|rect| round_px(rect.right() + margin.left))
                .unwrap_or(content_left);
            Vec2::new(left, content_top)
        }
    }
}

/// Number of items whose rounded trailing edge precedes the lifted node's.
pub fn destination_index(axis: Axis, lifted: &Rect, items: &[Rect]) -> usize {
    let trailing = round_px(axis.trailing(lifted));
    items
        .iter()
        .filter(|rect| trailing > round_px(axis.trailing(rect)))
        .count()
}

/// Remaining wait before a release may commit.
///
/// A placeholder still opening from the last hand-off must finish first.
pub fn commit_delay(now: Duration, last_insert: Option<Duration>, duration: Duration) -> Option<Duration> {
    let elapsed = now.saturating_sub(last_insert?);
    (elapsed < duration).then(|| duration - elapsed)
}

/// Styles animating the lifted node to `destination`.
pub fn settle_styles(destination: Vec2, transition: Transition) -> [StyleProp; 4] {
    [
        StyleProp::Transition(Some(transition)),
        StyleProp::Transform(Vec2::ZERO),
        StyleProp::Top(destination.y),
        StyleProp::Left(destination.x),
    ]
}
