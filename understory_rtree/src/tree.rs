// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree keyed by the stored boxes themselves, with SAH-like splits.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;

use crate::node::NodeRef;
use crate::types::{Aabb2D, Scalar, area, margin};

/// Default maximum fan-out of a node.
pub const DEFAULT_MAX_CHILDREN: usize = 8;

/// A 2D R-tree storing boxes.
///
/// Items are identified by value: [`RTree::remove`] deletes one stored box equal
/// to its argument. Duplicates are allowed and removed one at a time.
///
/// Leaf nodes have height `1`; each parent level adds one. The hierarchy can be
/// inspected read-only through [`RTree::root`].
#[derive(Clone)]
pub struct RTree<T: Scalar> {
    max_children: usize,
    min_children: usize,
    root: Option<NodeIdx>,
    pub(crate) arena: Vec<RNode<T>>,
    free: Vec<NodeIdx>,
    len: usize,
}

#[derive(Clone, Debug)]
pub(crate) struct RNode<T> {
    pub(crate) bbox: Aabb2D<T>,
    pub(crate) height: usize,
    pub(crate) children: Vec<RChild<T>>,
}

impl<T> RNode<T> {
    pub(crate) fn is_leaf(&self) -> bool {
        self.height == 1
    }
}

#[derive(Copy, Clone, Debug)]
pub(crate) enum RChild<T> {
    Node(NodeIdx),
    Item(Aabb2D<T>),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, Debug)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn centroid<T: Scalar>(self, b: &Aabb2D<T>) -> T {
        match self {
            Self::X => T::mid(b.min_x, b.max_x),
            Self::Y => T::mid(b.min_y, b.max_y),
        }
    }
}

impl<T: Scalar> Default for RTree<T> {
    fn default() -> Self {
        Self::with_max_children(DEFAULT_MAX_CHILDREN)
    }
}

impl<T: Scalar> RTree<T> {
    /// Create an empty tree with the default fan-out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree whose nodes hold at most `max_children` entries.
    ///
    /// Values below 2 are raised to 2. Splits keep at least `max_children / 2`
    /// entries on each side. Small fan-outs produce deeper trees, which is
    /// handy when the hierarchy itself is what you want to look at.
    pub fn with_max_children(max_children: usize) -> Self {
        let max_children = max_children.max(2);
        Self {
            max_children,
            min_children: (max_children / 2).max(1),
            root: None,
            arena: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of stored boxes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no boxes are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum fan-out of a node.
    pub fn max_children(&self) -> usize {
        self.max_children
    }

    /// Height of the tree: `0` when empty, `1` when the root is a leaf.
    pub fn height(&self) -> usize {
        self.root.map(|r| self.arena[r.get()].height).unwrap_or(0)
    }

    /// Read-only view of the root node, or `None` when the tree is empty.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|idx| NodeRef::new(self, idx))
    }

    /// Remove all boxes.
    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
        self.free.clear();
        self.len = 0;
    }

    /// Insert a box.
    pub fn insert(&mut self, bbox: Aabb2D<T>) {
        self.len += 1;
        let Some(root) = self.root else {
            let idx = self.push_node(RNode {
                bbox,
                height: 1,
                children: vec![RChild::Item(bbox)],
            });
            self.root = Some(idx);
            return;
        };
        if let Some(right) = self.insert_into(root, bbox) {
            // Root split: grow the tree by one level.
            let left_bb = self.arena[root.get()].bbox;
            let right_bb = self.arena[right.get()].bbox;
            let height = self.arena[root.get()].height + 1;
            let idx = self.push_node(RNode {
                bbox: left_bb.union(&right_bb),
                height,
                children: vec![RChild::Node(root), RChild::Node(right)],
            });
            self.root = Some(idx);
        }
    }

    /// All stored boxes intersecting `rect`. Touching edges count as intersecting.
    ///
    /// Results come in depth-first order of the hierarchy, left to right.
    pub fn search(&self, rect: &Aabb2D<T>) -> Vec<Aabb2D<T>> {
        let mut out = Vec::new();
        let Some(root) = self.root else {
            return out;
        };
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            let n = &self.arena[i.get()];
            if !n.bbox.intersects(rect) {
                continue;
            }
            if n.is_leaf() {
                for c in &n.children {
                    if let RChild::Item(bbox) = c
                        && bbox.intersects(rect)
                    {
                        out.push(*bbox);
                    }
                }
            } else {
                // Reverse so the leftmost child pops first.
                for c in n.children.iter().rev() {
                    if let RChild::Node(ci) = c {
                        stack.push(*ci);
                    }
                }
            }
        }
        out
    }

    /// All stored boxes, in the same order as a full-extent [`RTree::search`].
    pub fn items(&self) -> Vec<Aabb2D<T>> {
        match self.root {
            Some(root) => {
                let bbox = self.arena[root.get()].bbox;
                self.search(&bbox)
            }
            None => Vec::new(),
        }
    }

    /// Remove one stored box equal to `bbox`. Returns false if none is stored.
    pub fn remove(&mut self, bbox: &Aabb2D<T>) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        if !self.remove_from(root, bbox) {
            return false;
        }
        self.len -= 1;
        if self.arena[root.get()].children.is_empty() {
            self.clear();
        }
        true
    }

    fn push_node(&mut self, node: RNode<T>) -> NodeIdx {
        if let Some(idx) = self.free.pop() {
            self.arena[idx.get()] = node;
            return idx;
        }
        let idx = NodeIdx::new(self.arena.len());
        self.arena.push(node);
        idx
    }

    pub(crate) fn child_bbox(&self, c: &RChild<T>) -> Aabb2D<T> {
        match c {
            RChild::Node(i) => self.arena[i.get()].bbox,
            RChild::Item(bbox) => *bbox,
        }
    }

    fn children_bbox(&self, children: &[RChild<T>]) -> Option<Aabb2D<T>> {
        children
            .iter()
            .map(|c| self.child_bbox(c))
            .reduce(|acc, b| acc.union(&b))
    }

    /// Insert below `node`; returns the new right sibling if `node` had to split.
    fn insert_into(&mut self, node: NodeIdx, bbox: Aabb2D<T>) -> Option<NodeIdx> {
        let n = node.get();
        if self.arena[n].is_leaf() {
            self.arena[n].children.push(RChild::Item(bbox));
        } else if let Some((pos, child)) = self.choose_child(n, &bbox)
            && let Some(split) = self.insert_into(child, bbox)
        {
            self.arena[n]
                .children
                .insert(pos + 1, RChild::Node(split));
        }
        self.arena[n].bbox = self.arena[n].bbox.union(&bbox);
        if self.arena[n].children.len() > self.max_children {
            Some(self.split(n))
        } else {
            None
        }
    }

    /// Child needing the least enlargement to cover `bbox`; ties go to the smaller child.
    fn choose_child(&self, n: usize, bbox: &Aabb2D<T>) -> Option<(usize, NodeIdx)> {
        let mut best: Option<(T::Acc, T::Acc, usize, NodeIdx)> = None;
        for (pos, c) in self.arena[n].children.iter().enumerate() {
            let RChild::Node(ci) = c else {
                continue;
            };
            let cb = self.arena[ci.get()].bbox;
            let own = area(&cb);
            let enlargement = area(&cb.union(bbox)) - own;
            let better = best
                .as_ref()
                .is_none_or(|(e, a, ..)| enlargement < *e || (enlargement == *e && own < *a));
            if better {
                best = Some((enlargement, own, pos, *ci));
            }
        }
        best.map(|(.., pos, ci)| (pos, ci))
    }

    /// Split an overflowing node in place and return its new right sibling.
    fn split(&mut self, n: usize) -> NodeIdx {
        let children = core::mem::take(&mut self.arena[n].children);
        let (left, right) = self.partition(children);
        let l_bbox = self.children_bbox(&left);
        let r_bbox = self.children_bbox(&right);
        let height = self.arena[n].height;
        let node = &mut self.arena[n];
        node.children = left;
        if let Some(bb) = l_bbox {
            node.bbox = bb;
        }
        let fallback = node.bbox;
        self.push_node(RNode {
            bbox: r_bbox.unwrap_or(fallback),
            height,
            children: right,
        })
    }

    /// SAH-like split: for each axis sort by centroid, then pick `k` minimizing
    /// `area(LB_k) * k + area(RB_k) * (n - k)` using prefix/suffix unions.
    /// Zero-area candidates (point clouds) fall back to comparing margins.
    fn partition(&self, children: Vec<RChild<T>>) -> (Vec<RChild<T>>, Vec<RChild<T>>) {
        let n = children.len();
        let min = self.min_children.min(n / 2).max(1);
        let mut best: Option<((T::Acc, T::Acc), usize, Vec<RChild<T>>)> = None;
        for axis in [Axis::X, Axis::Y] {
            let mut sorted = children.clone();
            sorted.sort_by(|a, b| {
                axis.centroid(&self.child_bbox(a))
                    .partial_cmp(&axis.centroid(&self.child_bbox(b)))
                    .unwrap_or(Ordering::Equal)
            });
            let boxes: Vec<Aabb2D<T>> = sorted.iter().map(|c| self.child_bbox(c)).collect();
            let prefix = running_unions(boxes.iter().copied());
            let mut suffix = running_unions(boxes.iter().rev().copied());
            suffix.reverse();

            let mut axis_best: Option<((T::Acc, T::Acc), usize)> = None;
            for k in min..=(n - min) {
                let (lb, rb) = (prefix[k - 1], suffix[k]);
                let kl = T::acc_from_usize(k);
                let kr = T::acc_from_usize(n - k);
                let cost = (
                    area(&lb) * kl + area(&rb) * kr,
                    margin(&lb) * kl + margin(&rb) * kr,
                );
                if axis_best.as_ref().is_none_or(|(c, _)| lex_less(cost, *c)) {
                    axis_best = Some((cost, k));
                }
            }
            if let Some((cost, k)) = axis_best
                && best.as_ref().is_none_or(|(c, ..)| lex_less(cost, *c))
            {
                best = Some((cost, k, sorted));
            }
        }
        let (k, mut left) = match best {
            Some((_, k, sorted)) => (k, sorted),
            None => (n / 2, children),
        };
        let right = left.split_off(k);
        (left, right)
    }

    /// Remove one item equal to `target` below `node`, pruning emptied children.
    fn remove_from(&mut self, node: NodeIdx, target: &Aabb2D<T>) -> bool {
        let n = node.get();
        if !self.arena[n].bbox.contains(target) {
            return false;
        }
        if self.arena[n].is_leaf() {
            let pos = self.arena[n]
                .children
                .iter()
                .position(|c| matches!(c, RChild::Item(b) if b == target));
            let Some(pos) = pos else {
                return false;
            };
            let _ = self.arena[n].children.remove(pos);
        } else {
            let child_nodes: Vec<(usize, NodeIdx)> = self.arena[n]
                .children
                .iter()
                .enumerate()
                .filter_map(|(pos, c)| match c {
                    RChild::Node(ci) => Some((pos, *ci)),
                    RChild::Item(_) => None,
                })
                .collect();
            let mut hit = None;
            for (pos, ci) in child_nodes {
                if self.remove_from(ci, target) {
                    hit = Some((pos, ci));
                    break;
                }
            }
            let Some((pos, ci)) = hit else {
                return false;
            };
            if self.arena[ci.get()].children.is_empty() {
                let _ = self.arena[n].children.remove(pos);
                self.free.push(ci);
            }
        }
        if let Some(bb) = self.children_bbox(&self.arena[n].children) {
            self.arena[n].bbox = bb;
        }
        true
    }
}

fn running_unions<T: Scalar>(boxes: impl Iterator<Item = Aabb2D<T>>) -> Vec<Aabb2D<T>> {
    let mut out: Vec<Aabb2D<T>> = Vec::new();
    for b in boxes {
        let next = match out.last() {
            Some(prev) => prev.union(&b),
            None => b,
        };
        out.push(next);
    }
    out
}

fn lex_less<A: PartialOrd>(a: (A, A), b: (A, A)) -> bool {
    a.0 < b.0 || (a.0 == b.0 && a.1 < b.1)
}

impl<T: Scalar> Debug for RTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("max_children", &self.max_children)
            .field("min_children", &self.min_children)
            .field("arena_nodes", &self.arena.len())
            .field("free_nodes", &self.free.len())
            .field("len", &self.len)
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

/// R-tree with i64 coordinates and i128 metrics.
pub type RTreeI64 = RTree<i64>;

/// R-tree with f32 coordinates and f64 metrics.
pub type RTreeF32 = RTree<f32>;

/// R-tree with f64 coordinates and f64 metrics.
pub type RTreeF64 = RTree<f64>;
