//! Cross-container hit testing.

use crate::host::{LayoutHost, NodeHandle};
use sortable_core::geometry::Rect;

/// The dragged node's top-left corner lies strictly inside `container`.
///
/// Both rects are rounded to whole pixels first.
pub fn intersects(dragged: &Rect, container: &Rect) -> bool {
    container.contains_open(dragged.origin())
}

/// Read both rects from the host and test them.
pub fn node_intersects(host: &dyn LayoutHost, lifted: NodeHandle, container: NodeHandle) -> bool {
    let dragged = host.bounding_rect(lifted);
    let target = host.bounding_rect(container);
    let hit = intersects(&dragged, &target);
    tracing::trace!("intersect {} vs {}: {}", lifted, container, hit);
    hit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_inside() {
        let container = Rect::new(300.0, 100.0, 200.0, 400.0);
        assert!(intersects(&Rect::new(310.0, 120.0, 180.0, 40.0), &container));
    }

    #[test]
    fn corner_on_edge_is_outside() {
        let container = Rect::new(300.0, 100.0, 200.0, 400.0);
        assert!(!intersects(&Rect::new(300.0, 120.0, 180.0, 40.0), &container));
        assert!(!intersects(&Rect::new(310.0, 500.0, 180.0, 40.0), &container));
    }

    #[test]
    fn only_the_corner_counts() {
        // Overlaps heavily, but the top-left corner is left of the container.
        let container = Rect::new(300.0, 100.0, 200.0, 400.0);
        assert!(!intersects(&Rect::new(250.0, 120.0, 180.0, 40.0), &container));
    }

    #[test]
    fn rounding_applies() {
        let container = Rect::new(300.4, 100.0, 200.0, 400.0);
        assert!(!intersects(&Rect::new(299.6, 120.0, 10.0, 10.0), &container));
        assert!(intersects(&Rect::new(300.6, 120.0, 10.0, 10.0), &container));
    }
}
