// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rooted hierarchy diagram rebuilt from flat parent links.
//!
//! Entries are wired in two linear passes: one to map ids to slots, one to
//! attach each entry to its parent. An entry whose parent id is missing (or
//! points at itself) becomes an extra root instead of being dropped.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use crate::projector::{DiagramEntry, DiagramId, node_label};

/// One node of a [`Diagram`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagramNode {
    /// Id from the projection pass.
    pub id: DiagramId,
    /// Display tag, e.g. `R0`.
    pub label: String,
    /// Parent id as given, even if it did not resolve.
    pub parent: Option<DiagramId>,
    children: Vec<usize>,
}

/// Forest of labeled nodes, stored as slots in entry order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagram {
    nodes: Vec<DiagramNode>,
    roots: Vec<usize>,
}

impl Diagram {
    /// Build the diagram from entries in any order.
    ///
    /// Children keep the relative order of their entries.
    pub fn from_entries(entries: &[DiagramEntry]) -> Self {
        let slots: BTreeMap<DiagramId, usize> = entries
            .iter()
            .enumerate()
            .map(|(slot, e)| (e.id, slot))
            .collect();
        let mut nodes: Vec<DiagramNode> = entries
            .iter()
            .map(|e| DiagramNode {
                id: e.id,
                label: node_label(e.id),
                parent: e.parent,
                children: Vec::new(),
            })
            .collect();
        let mut roots = Vec::new();
        for (slot, e) in entries.iter().enumerate() {
            match e.parent.and_then(|p| slots.get(&p).copied()) {
                Some(parent) if parent != slot => nodes[parent].children.push(slot),
                _ => {
                    if e.parent.is_some() {
                        log::debug!("diagram entry {} has a dangling parent", e.id);
                    }
                    roots.push(slot);
                }
            }
        }
        Self { nodes, roots }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the diagram has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Slots of the root nodes.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Node at `slot`.
    pub fn node(&self, slot: usize) -> Option<&DiagramNode> {
        self.nodes.get(slot)
    }

    /// All nodes in entry order.
    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    /// Child nodes of the node at `slot`.
    pub fn children_of(&self, slot: usize) -> impl Iterator<Item = &DiagramNode> + '_ {
        self.nodes
            .get(slot)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|&c| self.nodes.get(c))
    }

    /// Indented text outline, one label per line, two spaces per level.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<(usize, usize)> = self.roots.iter().rev().map(|&r| (r, 0)).collect();
        while let Some((slot, level)) = stack.pop() {
            let node = &self.nodes[slot];
            let _ = writeln!(out, "{:indent$}{}", "", node.label, indent = level * 2);
            stack.extend(node.children.iter().rev().map(|&c| (c, level + 1)));
        }
        out
    }
}
