//! Measurement and scroll-container resolution against the mock host.

mod common;

use common::{Board, FRAME, ITEM};
use sortable_core::geometry::{Axis, Edges, Pointer, Rect, Size};
use sortable_core::id::Id;
use sortable_dnd::measure::{
    measure_node, resolve_container_scroll, resolve_scroll_ancestor, visible_rect,
};
use sortable_dnd::{
    ContainerConfig, LayoutHost, Overflow, PointerDown, PositionKind, ScrollTarget,
};
use sortable_test_utils::{HostCall, MockLayoutHost};

const FRAME_RECT: Rect = Rect::new(0.0, 100.0, 200.0, 400.0);

#[test]
fn test_measure_includes_margins() {
    let mut host = MockLayoutHost::new();
    let column = host.add_container(FRAME_RECT, Axis::Vertical);
    let item = host.add_item(column, ITEM);
    host.set_margin(item, Edges::new(4.0, 2.5, 6.0, 2.5));

    let metrics = measure_node(&host, item);
    assert_eq!(metrics.rect, Rect::new(2.5, 104.0, 200.0, 40.0));
    assert_eq!(metrics.margin.top, 4.0);
    assert_eq!(metrics.occupied, Size::new(205.0, 50.0));
}

#[test]
fn test_scroll_ancestor_is_first_scrolling_parent() {
    let mut host = MockLayoutHost::new();
    let outer = host.add_container(Rect::new(0.0, 0.0, 400.0, 600.0), Axis::Vertical);
    let inner = host.add_container_in(outer, FRAME_RECT, Axis::Vertical);
    let item = host.add_item(inner, ITEM);

    assert_eq!(resolve_scroll_ancestor(&host, item), ScrollTarget::Root);

    host.set_overflow(outer, Overflow::Scroll);
    assert_eq!(resolve_scroll_ancestor(&host, item), ScrollTarget::Node(outer));

    host.set_overflow(inner, Overflow::Auto);
    assert_eq!(resolve_scroll_ancestor(&host, item), ScrollTarget::Node(inner));

    // Hidden clips but does not scroll.
    host.set_overflow(inner, Overflow::Hidden);
    assert_eq!(resolve_scroll_ancestor(&host, item), ScrollTarget::Node(outer));
}

#[test]
fn test_fixed_node_scrolls_with_root() {
    let mut host = MockLayoutHost::new();
    let column = host.add_container(FRAME_RECT, Axis::Vertical);
    host.set_overflow(column, Overflow::Auto);
    let item = host.add_item(column, ITEM);
    host.set_position(item, PositionKind::Fixed);

    assert_eq!(resolve_scroll_ancestor(&host, item), ScrollTarget::Root);
}

#[test]
fn test_absolute_node_skips_static_ancestors() {
    let mut host = MockLayoutHost::new();
    let outer = host.add_container(Rect::new(0.0, 0.0, 400.0, 600.0), Axis::Vertical);
    let inner = host.add_container_in(outer, FRAME_RECT, Axis::Vertical);
    let item = host.add_item(inner, ITEM);
    host.set_position(item, PositionKind::Absolute);
    host.set_overflow(inner, Overflow::Auto);

    assert_eq!(resolve_scroll_ancestor(&host, item), ScrollTarget::Root);

    host.set_position(outer, PositionKind::Relative);
    host.set_overflow(outer, Overflow::Auto);
    assert_eq!(resolve_scroll_ancestor(&host, item), ScrollTarget::Node(outer));

    host.set_position(inner, PositionKind::Relative);
    assert_eq!(resolve_scroll_ancestor(&host, item), ScrollTarget::Node(inner));
}

#[test]
fn test_container_scroll_prefers_itself() {
    let mut host = MockLayoutHost::new();
    let outer = host.add_container(Rect::new(0.0, 0.0, 400.0, 600.0), Axis::Vertical);
    let inner = host.add_container_in(outer, FRAME_RECT, Axis::Vertical);
    host.set_overflow(outer, Overflow::Auto);

    assert_eq!(resolve_container_scroll(&host, inner), ScrollTarget::Node(outer));
    host.set_overflow(inner, Overflow::Scroll);
    assert_eq!(resolve_container_scroll(&host, inner), ScrollTarget::Node(inner));
}

#[test]
fn test_visible_rect() {
    let mut host = MockLayoutHost::with_viewport(Size::new(1024.0, 768.0));
    let column = host.add_container(FRAME_RECT, Axis::Vertical);

    assert_eq!(visible_rect(&host, ScrollTarget::Root), Rect::new(0.0, 0.0, 1024.0, 768.0));
    assert_eq!(visible_rect(&host, ScrollTarget::Node(column)), FRAME_RECT);
    assert_eq!(host.count_rect_reads(), 1);
}

#[test]
fn test_auto_scroll_follows_scrolling_container() {
    let mut board = Board::new();
    let column = board.column(ContainerConfig::new("list"), FRAME_RECT, &[1, 2, 3]);
    board.host.set_overflow(column, Overflow::Auto);

    board.dnd.pointer_down(
        &mut board.host,
        PointerDown::primary(Id::from_raw(1), Id::new("list"), Pointer::new(50.0, 110.0)),
    );
    assert_eq!(
        board.dnd.session().map(|s| s.scroll_container),
        Some(ScrollTarget::Node(column))
    );

    board.dnd.pointer_move(&mut board.host, Pointer::new(50.0, 490.0));
    board.update(FRAME);

    let scrolled = board.host.calls().into_iter().find_map(|c| match c {
        HostCall::ScrollTo { target, request } => Some((target, request.top)),
        _ => None,
    });
    assert_eq!(scrolled, Some((ScrollTarget::Node(column), Some(20.0))));
    assert_eq!(board.host.scroll_offset(ScrollTarget::Node(column)).y, 20.0);
    assert_eq!(board.host.scroll_offset(ScrollTarget::Root).y, 0.0);
}
