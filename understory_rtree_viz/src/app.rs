// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Application state: one owner for store, gesture, projection and frame.
//!
//! [`VizState`] is driven by pointer events and [`Command`] values. Every
//! mutating event runs to completion as mutate, reproject, redraw, so after
//! any call the [`projection`](VizState::projection), the
//! [`diagram`](VizState::diagram) and the [`frame`](VizState::frame) describe
//! the current store. Pointer moves and highlight changes only redraw.
//!
//! ```
//! use kurbo::Point;
//! use understory_rtree::RTree;
//! use understory_rtree_viz::app::{Command, VizConfig, VizState};
//! use understory_rtree_viz::types::PixelPoint;
//!
//! let mut viz = VizState::new(RTree::<i64>::new(), VizConfig::default());
//!
//! // Two clicks add two points.
//! for p in [Point::new(10.0, 10.0), Point::new(20.0, 20.0)] {
//!     viz.pointer_down(p);
//!     viz.pointer_up(p);
//! }
//! assert_eq!(viz.store().len(), 2);
//!
//! // A drag over both selects them; deleting the selection removes them.
//! viz.pointer_down(Point::new(5.0, 5.0));
//! viz.pointer_move(Point::new(25.0, 25.0));
//! viz.pointer_up(Point::new(25.0, 25.0));
//! assert_eq!(viz.search_results(), [PixelPoint::new(10, 10), PixelPoint::new(20, 20)]);
//!
//! viz.dispatch(Command::DeleteSelection);
//! assert!(viz.store().is_empty());
//! assert!(viz.projection().is_empty());
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::diagram::Diagram;
use crate::gesture::{GestureConfig, GestureController, Intent};
use crate::index::SpatialIndex;
use crate::projector::{Projection, ProjectionStyle, TreeProjector};
use crate::random::XorShift64;
use crate::render::{DrawCmd, RenderStyle, Renderer, Scene};
use crate::store::PointStore;
use crate::types::{PixelPoint, rect_to_pixel_box};

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct VizConfig {
    /// Canvas width in pixels; also the x range of random points.
    pub canvas_width: i64,
    /// Canvas height in pixels; also the y range of random points.
    pub canvas_height: i64,
    /// Click/drag tuning.
    pub gesture: GestureConfig,
    /// Hierarchy styling.
    pub projection: ProjectionStyle,
    /// Point and label styling.
    pub render: RenderStyle,
    /// Seed for [`Command::AddRandom`].
    pub random_seed: u64,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            canvas_width: 700,
            canvas_height: 700,
            gesture: GestureConfig::default(),
            projection: ProjectionStyle::default(),
            render: RenderStyle::default(),
            random_seed: 0x5EED,
        }
    }
}

/// A user action that is not a pointer gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Remove one point, e.g. from a search result row.
    DeletePoint(PixelPoint),
    /// Remove every point in the current search results.
    DeleteSelection,
    /// Remove up to `n` most recently added points.
    DeleteNewest(usize),
    /// Scatter up to `n` random points over the canvas.
    AddRandom(usize),
    /// Set or clear the enlarged point.
    Highlight(Option<PixelPoint>),
    /// Forget the current search results.
    ClearResults,
}

/// Owner of all visualization state.
#[derive(Debug)]
pub struct VizState<I> {
    width: i64,
    height: i64,
    store: PointStore<I>,
    gesture: GestureController,
    projector: TreeProjector,
    renderer: Renderer,
    rng: XorShift64,
    search_results: Vec<PixelPoint>,
    highlight: Option<PixelPoint>,
    cursor: Option<PixelPoint>,
    preview: Option<Rect>,
    projection: Projection,
    diagram: Diagram,
    frame: Vec<DrawCmd>,
}

impl<I: SpatialIndex + Default> Default for VizState<I> {
    fn default() -> Self {
        Self::new(I::default(), VizConfig::default())
    }
}

impl<I: SpatialIndex> VizState<I> {
    /// Wrap an empty index and draw the first frame.
    pub fn new(index: I, config: VizConfig) -> Self {
        let mut state = Self {
            width: config.canvas_width,
            height: config.canvas_height,
            store: PointStore::new(index),
            gesture: GestureController::new(config.gesture),
            projector: TreeProjector::new(config.projection),
            renderer: Renderer::new(config.render),
            rng: XorShift64::new(config.random_seed),
            search_results: Vec::new(),
            highlight: None,
            cursor: None,
            preview: None,
            projection: Projection::default(),
            diagram: Diagram::default(),
            frame: Vec::new(),
        };
        state.refresh();
        state
    }

    /// The point store.
    pub fn store(&self) -> &PointStore<I> {
        &self.store
    }

    /// The gesture controller.
    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    /// Projection of the current index hierarchy.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Diagram of the current index hierarchy.
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Display list of the current frame.
    pub fn frame(&self) -> &[DrawCmd] {
        &self.frame
    }

    /// Points found by the last drag, in index order.
    pub fn search_results(&self) -> &[PixelPoint] {
        &self.search_results
    }

    /// Currently enlarged point.
    pub fn highlight(&self) -> Option<PixelPoint> {
        self.highlight
    }

    /// Last pointer position seen, in pixels.
    pub fn cursor(&self) -> Option<PixelPoint> {
        self.cursor
    }

    /// Cursor readout, e.g. `X: 10, Y: 20`.
    pub fn cursor_text(&self) -> Option<String> {
        self.cursor.map(|c| c.to_string())
    }

    /// Pointer pressed.
    pub fn pointer_down(&mut self, pos: Point) {
        self.cursor = Some(PixelPoint::from_kurbo(pos));
        self.gesture.on_down(pos);
    }

    /// Pointer moved, pressed or not. Returns the selection preview while pressed.
    pub fn pointer_move(&mut self, pos: Point) -> Option<Rect> {
        self.cursor = Some(PixelPoint::from_kurbo(pos));
        self.preview = self.gesture.on_move(pos);
        self.redraw();
        self.preview
    }

    /// Pointer released. Applies and returns the recognized intent.
    pub fn pointer_up(&mut self, pos: Point) -> Option<Intent> {
        self.cursor = Some(PixelPoint::from_kurbo(pos));
        self.preview = None;
        let intent = self.gesture.on_up(pos);
        match intent {
            Some(Intent::AddPoint(p)) => {
                let p = PixelPoint::from_kurbo(p);
                log::debug!("add point {p}");
                if let Err(e) = self.store.try_add(p) {
                    log::debug!("add rejected: {e}");
                }
            }
            Some(Intent::SearchRegion(r)) => {
                let region = rect_to_pixel_box(r);
                self.search_results = self
                    .store
                    .index()
                    .search(&region)
                    .iter()
                    .map(PixelPoint::min_corner)
                    .collect();
                log::debug!(
                    "search {region:?} found {} points",
                    self.search_results.len()
                );
            }
            None => {}
        }
        self.refresh();
        intent
    }

    /// Abandon a press in progress and drop its preview.
    pub fn pointer_cancel(&mut self) {
        self.gesture.cancel();
        self.preview = None;
        self.redraw();
    }

    /// Apply a command.
    pub fn dispatch(&mut self, cmd: Command) {
        log::debug!("command {cmd:?}");
        match cmd {
            Command::DeletePoint(p) => {
                if let Err(e) = self.store.remove_point(p) {
                    log::debug!("delete skipped: {e}");
                }
                self.search_results.retain(|q| *q != p);
            }
            Command::DeleteSelection => {
                for p in core::mem::take(&mut self.search_results) {
                    if let Err(e) = self.store.remove_point(p) {
                        log::debug!("delete skipped: {e}");
                    }
                }
            }
            Command::DeleteNewest(n) => {
                let _ = self.store.delete_newest(n);
                let store = &self.store;
                self.search_results.retain(|q| store.contains(*q));
            }
            Command::AddRandom(n) => {
                let added = self
                    .store
                    .add_random(n, self.width, self.height, &mut self.rng);
                log::debug!("added {} of {n} random points", added.len());
            }
            Command::Highlight(p) => {
                self.highlight = p;
                self.redraw();
                return;
            }
            Command::ClearResults => self.search_results.clear(),
        }
        if self.highlight.is_some_and(|h| !self.store.contains(h)) {
            self.highlight = None;
        }
        self.refresh();
    }

    /// Reproject the index and redraw.
    pub fn refresh(&mut self) {
        self.projection = self.projector.project(self.store.index());
        self.diagram = self.projection.diagram();
        self.redraw();
    }

    fn redraw(&mut self) {
        self.frame = self.renderer.draw(&Scene {
            canvas: Size::new(self.width as f64, self.height as f64),
            rects: &self.projection.rects,
            points: self.store.points(),
            highlight: self.highlight,
            preview: self.preview,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_rtree::RTree;

    fn viz() -> VizState<RTree<i64>> {
        VizState::new(RTree::with_max_children(4), VizConfig::default())
    }

    fn click(v: &mut VizState<RTree<i64>>, x: f64, y: f64) -> Option<Intent> {
        v.pointer_down(Point::new(x, y));
        v.pointer_up(Point::new(x, y))
    }

    fn drag(v: &mut VizState<RTree<i64>>, from: Point, to: Point) -> Option<Intent> {
        v.pointer_down(from);
        let _ = v.pointer_move(to);
        v.pointer_up(to)
    }

    fn circles(v: &VizState<RTree<i64>>) -> Vec<f64> {
        v.frame()
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Circle { circle, .. } => Some(circle.radius),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn starts_empty() {
        let v = viz();
        assert!(v.store().is_empty());
        assert!(v.projection().is_empty());
        assert!(v.diagram().is_empty());
        assert_eq!(v.frame().len(), 1, "only the clear command");
        assert_eq!(v.cursor_text(), None);
    }

    #[test]
    fn duplicate_click_keeps_one_point() {
        let mut v = viz();
        let _ = click(&mut v, 10.0, 10.0);
        let _ = click(&mut v, 10.0, 10.0);
        assert_eq!(v.store().points(), [PixelPoint::new(10, 10)]);
        assert_eq!(v.store().index().len(), 1);
        assert_eq!(circles(&v), [5.0]);
    }

    #[test]
    fn clicks_round_to_pixels() {
        let mut v = viz();
        let _ = click(&mut v, 10.4, 19.6);
        assert_eq!(v.store().points(), [PixelPoint::new(10, 20)]);
        assert_eq!(v.cursor_text().as_deref(), Some("X: 10, Y: 20"));
    }

    #[test]
    fn drag_searches_without_deleting() {
        let mut v = viz();
        let _ = click(&mut v, 10.0, 10.0);
        let _ = click(&mut v, 20.0, 20.0);
        let _ = click(&mut v, 90.0, 90.0);
        let intent = drag(&mut v, Point::new(25.0, 25.0), Point::new(5.0, 5.0));
        assert_eq!(
            intent,
            Some(Intent::SearchRegion(Rect::new(5.0, 5.0, 25.0, 25.0)))
        );
        let mut found = v.search_results().to_vec();
        found.sort();
        assert_eq!(found, [PixelPoint::new(10, 10), PixelPoint::new(20, 20)]);
        assert_eq!(v.store().len(), 3);
    }

    #[test]
    fn drag_shows_preview_until_release() {
        let mut v = viz();
        v.pointer_down(Point::new(0.0, 0.0));
        let preview = v.pointer_move(Point::new(40.0, 30.0));
        assert_eq!(preview, Some(Rect::new(0.0, 0.0, 40.0, 30.0)));
        assert!(matches!(v.frame().last(), Some(DrawCmd::FillRect { .. })));
        let _ = v.pointer_up(Point::new(40.0, 30.0));
        assert!(!v.frame().iter().any(|c| matches!(c, DrawCmd::FillRect { .. })));
    }

    #[test]
    fn hover_moves_update_cursor_only() {
        let mut v = viz();
        assert_eq!(v.pointer_move(Point::new(3.0, 4.0)), None);
        assert_eq!(v.cursor(), Some(PixelPoint::new(3, 4)));
        assert!(v.store().is_empty());
    }

    #[test]
    fn delete_selection_empties_store_and_results() {
        let mut v = viz();
        let _ = click(&mut v, 10.0, 10.0);
        let _ = click(&mut v, 20.0, 20.0);
        let _ = drag(&mut v, Point::new(5.0, 5.0), Point::new(25.0, 25.0));
        assert_eq!(v.search_results().len(), 2);
        v.dispatch(Command::DeleteSelection);
        assert!(v.store().is_empty());
        assert!(v.store().index().is_empty());
        assert!(v.search_results().is_empty());
        assert!(v.projection().is_empty());
    }

    #[test]
    fn delete_point_drops_it_from_results_and_highlight() {
        let mut v = viz();
        let _ = click(&mut v, 10.0, 10.0);
        let _ = click(&mut v, 20.0, 20.0);
        let _ = drag(&mut v, Point::new(5.0, 5.0), Point::new(25.0, 25.0));
        v.dispatch(Command::Highlight(Some(PixelPoint::new(10, 10))));
        let mut radii = circles(&v);
        radii.sort_by(f64::total_cmp);
        assert_eq!(radii, [5.0, 10.0]);

        v.dispatch(Command::DeletePoint(PixelPoint::new(10, 10)));
        assert_eq!(v.search_results(), [PixelPoint::new(20, 20)]);
        assert_eq!(v.highlight(), None);
        assert_eq!(v.store().points(), [PixelPoint::new(20, 20)]);
    }

    #[test]
    fn delete_newest_is_lifo() {
        let mut v = viz();
        for (x, y) in [(300.0, 1.0), (1.0, 300.0), (150.0, 150.0)] {
            let _ = click(&mut v, x, y);
        }
        v.dispatch(Command::DeleteNewest(1));
        assert_eq!(
            v.store().points(),
            [PixelPoint::new(300, 1), PixelPoint::new(1, 300)]
        );
        v.dispatch(Command::DeleteNewest(10));
        assert!(v.store().is_empty());
    }

    #[test]
    fn random_points_stay_on_canvas() {
        let mut v = viz();
        v.dispatch(Command::AddRandom(200));
        assert!(v.store().len() > 150);
        assert_eq!(v.store().len(), v.store().index().len());
        for p in v.store().points() {
            assert!((0..=700).contains(&p.x) && (0..=700).contains(&p.y));
        }
        assert!(v.diagram().len() > 1);
        assert_eq!(v.projection().rects.len(), v.diagram().len());
        assert_eq!(v.diagram().roots().len(), 1);
    }

    #[test]
    fn clear_results_keeps_points() {
        let mut v = viz();
        let _ = click(&mut v, 10.0, 10.0);
        let _ = drag(&mut v, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        v.dispatch(Command::ClearResults);
        assert!(v.search_results().is_empty());
        assert_eq!(v.store().len(), 1);
    }

    #[test]
    fn cancel_drops_preview() {
        let mut v = viz();
        v.pointer_down(Point::new(0.0, 0.0));
        let _ = v.pointer_move(Point::new(50.0, 50.0));
        v.pointer_cancel();
        assert_eq!(v.pointer_up(Point::new(50.0, 50.0)), None);
        assert!(v.search_results().is_empty());
        assert!(!v.frame().iter().any(|c| matches!(c, DrawCmd::FillRect { .. })));
    }
}
