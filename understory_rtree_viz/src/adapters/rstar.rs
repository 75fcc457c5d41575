// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index contract for [`rstar::RTree`].
//!
//! ## Feature
//!
//! Enable with `rstar_adapter`.
//!
//! ## Notes
//!
//! Points are stored as degenerate [`Rectangle`]s so they round-trip through
//! `remove` by equality. `rstar` has no explicit leaf flag or height; a parent
//! node counts as a leaf when all of its entries are data items, and height is
//! measured down the first child (the tree is balanced).

use alloc::vec::Vec;

use rstar::primitives::Rectangle;
use rstar::{AABB, ParentNode, RTree, RTreeNode};

use crate::index::{IndexNode, SpatialIndex};
use crate::types::PixelBox;

/// Rectangle type stored in the `rstar` tree.
pub type PixelRect = Rectangle<[i64; 2]>;

/// An `rstar` tree usable as the demo's index.
pub type RstarIndex = RTree<PixelRect>;

fn to_rect(b: &PixelBox) -> PixelRect {
    Rectangle::from_corners([b.min_x, b.min_y], [b.max_x, b.max_y])
}

fn from_envelope(e: &AABB<[i64; 2]>) -> PixelBox {
    let (lo, hi) = (e.lower(), e.upper());
    PixelBox::new(lo[0], lo[1], hi[0], hi[1])
}

/// Borrowed view of an `rstar` parent node.
#[derive(Clone, Copy, Debug)]
pub struct RstarNode<'a> {
    node: &'a ParentNode<PixelRect>,
}

impl IndexNode for RstarNode<'_> {
    fn bounds(&self) -> PixelBox {
        from_envelope(&self.node.envelope())
    }

    fn height(&self) -> usize {
        match self.children().next() {
            Some(child) => child.height() + 1,
            None => 1,
        }
    }

    fn is_leaf(&self) -> bool {
        self.node
            .children()
            .iter()
            .all(|c| matches!(c, RTreeNode::Leaf(_)))
    }

    fn children(&self) -> impl Iterator<Item = Self> {
        let node = self.node;
        node.children().iter().filter_map(|c| match c {
            RTreeNode::Parent(p) => Some(RstarNode { node: p }),
            RTreeNode::Leaf(_) => None,
        })
    }
}

impl SpatialIndex for RstarIndex {
    type Node<'a> = RstarNode<'a>;

    fn insert(&mut self, b: PixelBox) {
        RTree::insert(self, to_rect(&b));
    }

    fn search(&self, b: &PixelBox) -> Vec<PixelBox> {
        let envelope = AABB::from_corners([b.min_x, b.min_y], [b.max_x, b.max_y]);
        self.locate_in_envelope_intersecting(&envelope)
            .map(|r| PixelBox::new(r.lower()[0], r.lower()[1], r.upper()[0], r.upper()[1]))
            .collect()
    }

    fn remove(&mut self, b: &PixelBox) {
        let _ = RTree::remove(self, &to_rect(b));
    }

    fn root(&self) -> Option<Self::Node<'_>> {
        if self.size() == 0 {
            return None;
        }
        Some(RstarNode {
            node: RTree::root(self),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::TreeProjector;
    use crate::store::PointStore;
    use crate::types::PixelPoint;

    #[test]
    fn store_stays_in_sync_with_rstar() {
        let mut store = PointStore::new(RstarIndex::new());
        for i in 0..40 {
            let _ = store.try_add(PixelPoint::new(i * 3, (i * 7) % 50));
        }
        assert_eq!(store.index().size(), 40);
        let removed = store.remove_region(&PixelBox::new(0, 0, 30, 50));
        assert_eq!(store.len(), 40 - removed.len());
        assert_eq!(store.index().size(), store.len());
    }

    #[test]
    fn rstar_hierarchy_projects() {
        let mut store = PointStore::new(RstarIndex::new());
        for i in 0..100 {
            let _ = store.try_add(PixelPoint::new(i % 10 * 10, i / 10 * 10));
        }
        let projection = TreeProjector::default().project(store.index());
        assert!(projection.rects.len() > 1);
        assert_eq!(projection.entries[0].parent, None);
        let root = SpatialIndex::root(store.index()).expect("non-empty");
        assert!(!root.is_leaf());
        assert!(root.height() >= 2);
    }
}
