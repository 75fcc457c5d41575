// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted pointer session against the visualization core.
//!
//! Clicks add points, a drag selects a region, and the selection is deleted.
//! After each step the diagram outline and a summary of the display list are
//! printed.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_rtree_viz_demos --example viz_session`

use kurbo::Point;
use understory_rtree::RTree;
use understory_rtree_viz::render::DrawCmd;
use understory_rtree_viz::{Command, VizConfig, VizState};

fn click(viz: &mut VizState<RTree<i64>>, x: f64, y: f64) {
    let p = Point::new(x, y);
    viz.pointer_down(p);
    // Jitter inside the dead zone.
    let _ = viz.pointer_move(Point::new(x + 3.0, y - 2.0));
    let intent = viz.pointer_up(p);
    println!("click ({x}, {y}) -> {intent:?}");
}

fn drag(viz: &mut VizState<RTree<i64>>, from: Point, to: Point) {
    viz.pointer_down(from);
    let preview = viz.pointer_move(to);
    println!("preview {preview:?}");
    let intent = viz.pointer_up(to);
    println!("drag {from:?} -> {to:?} -> {intent:?}");
}

fn report(viz: &VizState<RTree<i64>>, title: &str) {
    let (mut strokes, mut labels, mut circles) = (0, 0, 0);
    for cmd in viz.frame() {
        match cmd {
            DrawCmd::StrokeRect { .. } => strokes += 1,
            DrawCmd::Label { .. } => labels += 1,
            DrawCmd::Circle { .. } => circles += 1,
            DrawCmd::Clear { .. } | DrawCmd::FillRect { .. } => {}
        }
    }
    println!("== {title}");
    println!(
        "points: {}  nodes: {}  strokes: {strokes}  labels: {labels}  circles: {circles}",
        viz.store().len(),
        viz.projection().len(),
    );
    if let Some(cursor) = viz.cursor_text() {
        println!("cursor: {cursor}");
    }
    print!("{}", viz.diagram().outline());
    println!();
}

fn main() {
    env_logger::init();

    let mut viz = VizState::new(RTree::with_max_children(4), VizConfig::default());

    for (x, y) in [(40.0, 40.0), (60.0, 80.0), (300.0, 120.0), (320.0, 140.0), (500.0, 500.0)] {
        click(&mut viz, x, y);
    }
    // Same pixel again: rejected.
    click(&mut viz, 40.0, 40.0);
    report(&viz, "after clicks");

    drag(&mut viz, Point::new(20.0, 20.0), Point::new(340.0, 160.0));
    for p in viz.search_results() {
        println!("result {p}");
    }
    if let Some(&first) = viz.search_results().first() {
        viz.dispatch(Command::Highlight(Some(first)));
    }
    report(&viz, "after search");

    viz.dispatch(Command::DeleteSelection);
    report(&viz, "after deleting the selection");

    viz.dispatch(Command::AddRandom(40));
    report(&viz, "after 40 random points");

    viz.dispatch(Command::DeleteNewest(30));
    report(&viz, "after deleting the 30 newest");
}
