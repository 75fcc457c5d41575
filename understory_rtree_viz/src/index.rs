// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract this crate needs from a spatial index.
//!
//! The index itself (node splitting, balancing, search predicate) is an
//! external collaborator. It is consumed through three operations on boxes
//! plus a read-only view of its node hierarchy for the projector.
//!
//! An implementation for [`understory_rtree::RTree`] is provided here; see
//! [`adapters`](crate::adapters) for others.

use alloc::vec::Vec;

use understory_rtree::{NodeRef, RTree};

use crate::types::{PixelBox, PixelPoint};

/// Read-only view of one node of an index hierarchy.
pub trait IndexNode: Sized {
    /// Bounding box of the node's subtree.
    fn bounds(&self) -> PixelBox;

    /// Height marker: `1` for leaves, growing toward the root.
    fn height(&self) -> usize;

    /// Whether the node holds data items rather than child nodes.
    fn is_leaf(&self) -> bool;

    /// Child nodes in order. Leaves have none.
    fn children(&self) -> impl Iterator<Item = Self>;
}

/// Box-level operations of a spatial index.
///
/// Search semantics (overlap vs. containment, edge inclusion) belong to the
/// implementation and are treated as opaque by callers.
pub trait SpatialIndex {
    /// Node view type borrowed from the index.
    type Node<'a>: IndexNode
    where
        Self: 'a;

    /// Store a box.
    fn insert(&mut self, b: PixelBox);

    /// Stored boxes satisfying the index's search predicate for `b`.
    fn search(&self, b: &PixelBox) -> Vec<PixelBox>;

    /// Remove one stored box equal to `b`. Does nothing if absent.
    fn remove(&mut self, b: &PixelBox);

    /// Root of the hierarchy, or `None` when there is nothing to show.
    fn root(&self) -> Option<Self::Node<'_>>;

    /// Store a point as its degenerate box.
    fn insert_point(&mut self, p: PixelPoint) {
        self.insert(p.to_box());
    }

    /// Remove a point's degenerate box.
    fn remove_point(&mut self, p: PixelPoint) {
        self.remove(&p.to_box());
    }
}

impl IndexNode for NodeRef<'_, i64> {
    fn bounds(&self) -> PixelBox {
        self.bbox()
    }

    fn height(&self) -> usize {
        NodeRef::height(self)
    }

    fn is_leaf(&self) -> bool {
        NodeRef::is_leaf(self)
    }

    fn children(&self) -> impl Iterator<Item = Self> {
        NodeRef::children(self)
    }
}

impl SpatialIndex for RTree<i64> {
    type Node<'a> = NodeRef<'a, i64>;

    fn insert(&mut self, b: PixelBox) {
        Self::insert(self, b);
    }

    fn search(&self, b: &PixelBox) -> Vec<PixelBox> {
        Self::search(self, b)
    }

    fn remove(&mut self, b: &PixelBox) {
        let _ = Self::remove(self, b);
    }

    fn root(&self) -> Option<Self::Node<'_>> {
        Self::root(self)
    }
}
