// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The same random point set projected from two index backends.
//!
//! The bundled R-tree and `rstar` split nodes differently, so their diagrams
//! differ while the stored points and search results agree.
//!
//! Run:
//! - `cargo run -p understory_rtree_viz_demos --example rstar_backend`

use understory_rtree::RTree;
use understory_rtree_viz::adapters::rstar::RstarIndex;
use understory_rtree_viz::projector::TreeProjector;
use understory_rtree_viz::random::XorShift64;
use understory_rtree_viz::types::PixelBox;
use understory_rtree_viz::{PointStore, SpatialIndex};

fn describe<I: SpatialIndex>(name: &str, store: &PointStore<I>) {
    let projection = TreeProjector::default().project(store.index());
    let depth = projection.rects.iter().map(|r| r.depth).max().unwrap_or(0);
    println!(
        "{name}: {} points, {} nodes, max depth {depth}",
        store.len(),
        projection.len()
    );
    print!("{}", projection.diagram().outline());
    println!();
}

fn main() {
    env_logger::init();

    let mut ours = PointStore::new(RTree::<i64>::with_max_children(6));
    let mut theirs = PointStore::new(RstarIndex::new());
    let mut rng_a = XorShift64::new(2025);
    let mut rng_b = XorShift64::new(2025);
    let _ = ours.add_random(60, 700, 700, &mut rng_a);
    let _ = theirs.add_random(60, 700, 700, &mut rng_b);

    describe("understory_rtree", &ours);
    describe("rstar", &theirs);

    let region = PixelBox::new(100, 100, 400, 400);
    let mut a = SpatialIndex::search(ours.index(), &region);
    let mut b = SpatialIndex::search(theirs.index(), &region);
    a.sort_by_key(|r| (r.min_x, r.min_y));
    b.sort_by_key(|r| (r.min_x, r.min_y));
    println!("search {region:?}: {} hits, backends agree: {}", a.len(), a == b);
    log::info!("done");
}
