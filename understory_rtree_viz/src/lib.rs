// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_rtree_viz --heading-base-level=0

//! Understory R-tree viz: the headless core of an interactive R-tree visualizer.
//!
//! Clicks add points, drags search a rectangle, and after every change the
//! index hierarchy is re-projected into nested outlines and a parent/child
//! diagram. Nothing here touches a real canvas; hosts feed pointer events and
//! [`Command`](app::Command)s in and replay the resulting display list.
//!
//! - [`gesture`]: click-versus-drag recognition with a dead zone.
//! - [`store`]: the point list, kept in lockstep with a spatial index.
//! - [`index`]: the [`SpatialIndex`](index::SpatialIndex) contract and its
//!   implementation for [`understory_rtree::RTree`].
//! - [`projector`] and [`diagram`]: one pre-order walk producing draw
//!   rectangles and a rooted diagram.
//! - [`render`]: display-list rendering.
//! - [`app`]: [`VizState`](app::VizState), which owns all of the above.
//!
//! # Example
//!
//! ```rust
//! use understory_rtree::RTree;
//! use understory_rtree_viz::projector::TreeProjector;
//! use understory_rtree_viz::store::PointStore;
//! use understory_rtree_viz::types::PixelPoint;
//!
//! let mut store = PointStore::new(RTree::<i64>::with_max_children(4));
//! for i in 0..5 {
//!     store.try_add(PixelPoint::new(i * 10, i * 10)).unwrap();
//! }
//!
//! // A root with two leaf children: three rectangles, one diagram root.
//! let projection = TreeProjector::default().project(store.index());
//! assert_eq!(projection.rects.len(), 3);
//! let diagram = projection.diagram();
//! assert_eq!(diagram.roots().len(), 1);
//! assert_eq!(diagram.outline(), "R0\n  R1\n  R2\n");
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm`.
//! - `rstar_adapter`: implements the index contract for `rstar::RTree`.

extern crate alloc;

pub mod adapters;
pub mod app;
pub mod diagram;
pub mod gesture;
pub mod index;
pub mod projector;
pub mod random;
pub mod render;
pub mod store;
pub mod types;

pub use app::{Command, VizConfig, VizState};
pub use index::{IndexNode, SpatialIndex};
pub use store::{PointStore, StoreError};
pub use types::{Color, PixelBox, PixelPoint};
