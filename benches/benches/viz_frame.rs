// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_rtree::RTree;
use understory_rtree_viz::projector::TreeProjector;
use understory_rtree_viz::random::XorShift64;
use understory_rtree_viz::render::{Renderer, Scene};
use understory_rtree_viz::types::{PixelBox, PixelPoint};
use understory_rtree_viz::{Command, PointStore, VizState};

const CANVAS: i64 = 700;

fn filled_store(n: usize, fanout: usize) -> PointStore<RTree<i64>> {
    let mut store = PointStore::new(RTree::with_max_children(fanout));
    let mut rng = XorShift64::new(0xC0FFEE);
    let _ = store.add_random(n, CANVAS, CANVAS, &mut rng);
    store
}

fn bench_store_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_ops");
    for &n in &[1_000usize, 10_000] {
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("add_random_n{n}"), |b| {
            b.iter_batched(
                || (PointStore::new(RTree::<i64>::new()), XorShift64::new(7)),
                |(mut store, mut rng)| {
                    let added = store.add_random(n, CANVAS, CANVAS, &mut rng);
                    black_box(added.len());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("remove_region_n{n}"), |b| {
            b.iter_batched(
                || filled_store(n, 8),
                |mut store| {
                    let removed = store.remove_region(&PixelBox::new(100, 100, 400, 400));
                    black_box(removed.len());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("delete_newest_half_n{n}"), |b| {
            b.iter_batched(
                || filled_store(n, 8),
                |mut store| {
                    let removed = store.delete_newest(n / 2);
                    black_box(removed.len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    for &(n, fanout) in &[(1_000usize, 4usize), (1_000, 8), (10_000, 8)] {
        let store = filled_store(n, fanout);
        let projector = TreeProjector::default();
        let renderer = Renderer::default();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("project_n{n}_m{fanout}"), |b| {
            b.iter(|| {
                let p = projector.project(store.index());
                black_box(p.len());
            });
        });

        let projection = projector.project(store.index());
        group.bench_function(format!("diagram_n{n}_m{fanout}"), |b| {
            b.iter(|| {
                let d = projection.diagram();
                black_box(d.roots().len());
            });
        });

        group.bench_function(format!("render_n{n}_m{fanout}"), |b| {
            b.iter(|| {
                let cmds = renderer.draw(&Scene {
                    canvas: Size::new(CANVAS as f64, CANVAS as f64),
                    rects: &projection.rects,
                    points: store.points(),
                    highlight: Some(PixelPoint::new(0, 0)),
                    preview: None,
                });
                black_box(cmds.len());
            });
        });
    }
    group.finish();
}

fn bench_click_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("viz_state");
    group.bench_function("add_random_1000_then_clear", |b| {
        b.iter_batched(
            VizState::<RTree<i64>>::default,
            |mut viz| {
                viz.dispatch(Command::AddRandom(1_000));
                viz.dispatch(Command::DeleteNewest(1_000));
                black_box(viz.frame().len());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_store_ops, bench_projection, bench_click_stream);
criterion_main!(benches);
