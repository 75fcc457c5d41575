// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_rtree --heading-base-level=0

//! Understory R-tree: a box-keyed 2D R-tree with an inspectable hierarchy.
//!
//! - Insert axis-aligned boxes, search by intersecting rectangle, remove by value.
//! - Walk the node hierarchy read-only through [`NodeRef`] (bounds, height, leaf flag, children).
//!
//! The tree stores the boxes themselves and identifies items by value, which is the shape
//! visualization tools and teaching demos want: a point is stored as a degenerate box and removed
//! by passing the same box back.
//!
//! Splits use a SAH-like heuristic: for a sorted axis and split
//! point `k` we minimize `area(LB_k) * k + area(RB_k) * (n - k)`, with margins as a tie-break so
//! clouds of zero-area points still split sensibly.
//! Accumulators are widened (`f32`→`f64`, `f64`→`f64`, `i64`→`i128`).
//!
//! # Example
//!
//! ```rust
//! use understory_rtree::{Aabb2D, RTree};
//!
//! let mut tree: RTree<i64> = RTree::with_max_children(4);
//! for i in 0..5 {
//!     tree.insert(Aabb2D::point(i * 10, i * 10));
//! }
//!
//! // Five items overflow a fan-out of four: the root now has two leaf children.
//! let root = tree.root().unwrap();
//! assert_eq!(root.height(), 2);
//! assert_eq!(root.children().count(), 2);
//!
//! let hits = tree.search(&Aabb2D::new(5, 5, 25, 25));
//! assert_eq!(hits.len(), 2);
//!
//! assert!(tree.remove(&Aabb2D::point(10, 10)));
//! assert_eq!(tree.len(), 4);
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates.

#![no_std]

extern crate alloc;

pub mod node;
pub mod tree;
pub mod types;

pub use node::NodeRef;
pub use tree::{DEFAULT_MAX_CHILDREN, RTree, RTreeF32, RTreeF64, RTreeI64};
pub use types::{Aabb2D, Scalar};
