// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_rtree::RTree;
use understory_rtree_viz::adapters::rstar::RstarIndex;
use understory_rtree_viz::projector::TreeProjector;
use understory_rtree_viz::random::XorShift64;
use understory_rtree_viz::types::PixelBox;
use understory_rtree_viz::{PointStore, SpatialIndex};

const CANVAS: i64 = 700;

fn fill<I: SpatialIndex>(index: I, n: usize) -> PointStore<I> {
    let mut store = PointStore::new(index);
    let mut rng = XorShift64::new(0xBADC0DE);
    let _ = store.add_random(n, CANVAS, CANVAS, &mut rng);
    store
}

fn bench_store_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare");
    let query = PixelBox::new(150, 150, 450, 450);
    for &n in &[1_000usize, 5_000] {
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("understory_fill_search_n{n}"), |b| {
            b.iter_batched(
                RTree::<i64>::new,
                |idx| {
                    let store = fill(idx, n);
                    black_box(store.index().search(&query).len());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_fill_search_n{n}"), |b| {
            b.iter_batched(
                RstarIndex::new,
                |idx| {
                    let store = fill(idx, n);
                    black_box(SpatialIndex::search(store.index(), &query).len());
                },
                BatchSize::SmallInput,
            );
        });

        let ours = fill(RTree::<i64>::new(), n);
        let theirs = fill(RstarIndex::new(), n);
        let projector = TreeProjector::default();

        group.bench_function(format!("understory_project_n{n}"), |b| {
            b.iter(|| black_box(projector.project(ours.index()).len()));
        });

        group.bench_function(format!("rstar_project_n{n}"), |b| {
            b.iter(|| black_box(projector.project(theirs.index()).len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_store_backends);
criterion_main!(benches);
