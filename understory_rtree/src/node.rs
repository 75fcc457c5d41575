// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only view of the tree's node hierarchy.

use core::fmt::Debug;

use crate::tree::{NodeIdx, RChild, RTree};
use crate::types::{Aabb2D, Scalar};

/// Borrowed handle to one node of an [`RTree`].
///
/// Views are cheap to copy and cannot mutate the tree. They are invalidated
/// (by the borrow checker) by any mutation of the tree.
#[derive(Clone, Copy)]
pub struct NodeRef<'a, T: Scalar> {
    tree: &'a RTree<T>,
    idx: NodeIdx,
}

impl<'a, T: Scalar> NodeRef<'a, T> {
    pub(crate) fn new(tree: &'a RTree<T>, idx: NodeIdx) -> Self {
        Self { tree, idx }
    }

    /// Bounding box of everything below this node.
    pub fn bbox(&self) -> Aabb2D<T> {
        self.tree.arena[self.idx.get()].bbox
    }

    /// Height above the data: `1` for leaves.
    pub fn height(&self) -> usize {
        self.tree.arena[self.idx.get()].height
    }

    /// Whether this node holds data items rather than child nodes.
    pub fn is_leaf(&self) -> bool {
        self.tree.arena[self.idx.get()].is_leaf()
    }

    /// Number of direct entries (child nodes or items).
    pub fn len(&self) -> usize {
        self.tree.arena[self.idx.get()].children.len()
    }

    /// Always false for nodes reachable from the root.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Child nodes, in order. Empty for leaves.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, T>> + use<'a, T> {
        let tree = self.tree;
        tree.arena[self.idx.get()]
            .children
            .iter()
            .filter_map(move |c| match c {
                RChild::Node(i) => Some(NodeRef::new(tree, *i)),
                RChild::Item(_) => None,
            })
    }

    /// Stored boxes held directly by this node. Empty for internal nodes.
    pub fn items(&self) -> impl Iterator<Item = Aabb2D<T>> + use<'a, T> {
        let tree = self.tree;
        tree.arena[self.idx.get()]
            .children
            .iter()
            .filter_map(|c| match c {
                RChild::Item(b) => Some(*b),
                RChild::Node(_) => None,
            })
    }
}

impl<T: Scalar> Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeRef")
            .field("bbox", &self.bbox())
            .field("height", &self.height())
            .field("entries", &self.len())
            .finish()
    }
}
