//! Benchmarks for the reflow pass

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sortable_core::geometry::{Axis, Pointer, Rect, Size};
use sortable_core::math::Vec2;
use sortable_dnd::reflow::{ReflowRequest, plan_reflow, reflow};
use sortable_dnd::{
    LayoutHost, NodeHandle, PositionKind, StyleProp, TimingFunction, Transition, TransitionProperty,
};
use sortable_test_utils::MockLayoutHost;
use std::time::Duration;

const ITEM: Size = Size::new(200.0, 40.0);

fn bench_plan_reflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_reflow");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));

        let siblings: Vec<(NodeHandle, Rect)> = (0..size)
            .map(|i| {
                let top = i as f32 * ITEM.height;
                (NodeHandle(i as u64), Rect::new(0.0, top, ITEM.width, ITEM.height))
            })
            .collect();
        let threshold = Vec2::new(0.0, size as f32 * ITEM.height / 2.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), &siblings, |b, siblings| {
            b.iter(|| plan_reflow(Axis::Vertical, black_box(threshold), black_box(siblings)));
        });
    }

    group.finish();
}

fn bench_reflow_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("reflow_pass");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));

        let mut host = MockLayoutHost::with_viewport(Size::new(800.0, size as f32 * ITEM.height));
        let frame = Rect::new(0.0, 0.0, ITEM.width, size as f32 * ITEM.height);
        let column = host.add_container(frame, Axis::Vertical);
        let items: Vec<NodeHandle> = (0..size).map(|_| host.add_item(column, ITEM)).collect();
        let lifted = items[size / 2];
        host.set_style(lifted, StyleProp::Position(PositionKind::Fixed));
        host.set_style(lifted, StyleProp::Top(frame.height / 2.0));

        let transition = Transition::new(
            TransitionProperty::TRANSFORM,
            Duration::from_millis(200),
            TimingFunction::EaseInOut,
        );

        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| {
                let outcome = reflow(
                    &mut host,
                    &ReflowRequest {
                        axis: Axis::Vertical,
                        target: lifted,
                        pointer: Pointer::new(10.0, frame.height / 2.0),
                        siblings: items,
                        lifted,
                        occupied: ITEM,
                        transition,
                    },
                );
                host.clear_calls();
                outcome
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_plan_reflow, bench_reflow_pass);
criterion_main!(benches);
