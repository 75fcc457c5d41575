// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projection of an index hierarchy into draw rectangles and diagram entries.
//!
//! One depth-first pre-order walk produces both outputs together, so the
//! `i`-th rectangle and the `i`-th diagram entry always describe the same node.
//!
//! ## Identifiers
//!
//! Diagram ids are the pre-order position of the node in the current pass,
//! starting at `0` every time. They are only meaningful within one
//! [`Projection`]; do not keep them across passes.
//!
//! ## Depth cap
//!
//! The walk emits nodes down to [`ProjectionStyle::max_depth`] (root is depth
//! `0`) and never descends further. Leaves also stop the walk, since their
//! entries are data items rather than nodes.
//!
//! ## Styling
//!
//! The root uses a fixed highlight color and alpha. Other nodes take their
//! color from the palette by height (`(height - 1) mod len`) and fade with depth
//! as `1 / depth^1.2`. Nodes with zero width and zero height keep their slot in
//! both outputs but are flagged as neither stroked nor labeled.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::diagram::Diagram;
use crate::index::{IndexNode, SpatialIndex};
use crate::types::{Color, PixelBox};

/// Pre-order position of a node within one projection pass.
pub type DiagramId = usize;

/// Default depth cap.
pub const DEFAULT_MAX_DEPTH: usize = 6;

bitflags::bitflags! {
    /// What the renderer should do with a projected rectangle.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DrawFlags: u8 {
        /// Stroke the outline.
        const STROKE = 0b0000_0001;
        /// Draw the rectangle's list position as a label.
        const LABEL  = 0b0000_0010;
    }
}

/// Projection styling.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionStyle {
    /// Deepest traversal depth that is still emitted. The root is depth `0`.
    pub max_depth: usize,
    /// Outline color of the root.
    pub root_color: Color,
    /// Alpha hint of the root.
    pub root_alpha: f64,
    /// Colors for non-root nodes, indexed by height. An empty palette falls
    /// back to `root_color`.
    pub palette: Vec<Color>,
}

impl Default for ProjectionStyle {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            root_color: Color::HIGHLIGHT,
            root_alpha: 0.2,
            palette: vec![Color::BLACK, Color::WHITE, Color::UMBER],
        }
    }
}

/// One projected node, ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRect {
    /// Outline color.
    pub color: Color,
    /// Opacity hint in `0.0..=1.0`.
    pub alpha: f64,
    /// `[x, y, width, height]` in whole pixels.
    pub rect: [i64; 4],
    /// The node's height in the index (`1` for leaves).
    pub depth_marker: usize,
    /// Traversal depth (`0` for the root).
    pub depth: usize,
    /// Stroke/label flags.
    pub flags: DrawFlags,
}

impl RenderRect {
    /// Whether the rectangle is stroked at all.
    pub fn is_visible(&self) -> bool {
        self.flags.contains(DrawFlags::STROKE)
    }

    /// The rectangle as a Kurbo rect.
    pub fn to_kurbo(&self) -> kurbo::Rect {
        let [x, y, w, h] = self.rect;
        kurbo::Rect::new(x as f64, y as f64, (x + w) as f64, (y + h) as f64)
    }
}

/// Parent link of one projected node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagramEntry {
    /// Pre-order id within this pass.
    pub id: DiagramId,
    /// Id of the parent node, `None` for the root.
    pub parent: Option<DiagramId>,
}

impl DiagramEntry {
    /// Display tag, e.g. `R3`.
    pub fn label(&self) -> String {
        node_label(self.id)
    }
}

/// Display tag for a diagram id, e.g. `R3`.
pub fn node_label(id: DiagramId) -> String {
    format!("R{id}")
}

/// Result of one projection pass. Index `i` of both lists is the same node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Projection {
    /// Draw rectangles in pre-order.
    pub rects: Vec<RenderRect>,
    /// Diagram entries in pre-order.
    pub entries: Vec<DiagramEntry>,
}

impl Projection {
    /// True if nothing was projected (e.g. empty index).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of projected nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Rooted diagram built from the entries.
    pub fn diagram(&self) -> Diagram {
        Diagram::from_entries(&self.entries)
    }
}

/// Walks an index hierarchy and produces a [`Projection`].
#[derive(Clone, Debug, Default)]
pub struct TreeProjector {
    style: ProjectionStyle,
}

impl TreeProjector {
    /// Create a projector with the given styling.
    pub fn new(style: ProjectionStyle) -> Self {
        Self { style }
    }

    /// Styling in use.
    pub fn style(&self) -> &ProjectionStyle {
        &self.style
    }

    /// Project the current hierarchy of `index`. An empty index projects to nothing.
    pub fn project<I: SpatialIndex>(&self, index: &I) -> Projection {
        self.project_root(index.root())
    }

    /// Project the hierarchy below `root`.
    pub fn project_root<N: IndexNode>(&self, root: Option<N>) -> Projection {
        let mut out = Projection::default();
        if let Some(root) = root {
            self.visit(&root, 0, None, &mut out);
        }
        log::trace!("projected {} nodes", out.len());
        out
    }

    fn visit<N: IndexNode>(
        &self,
        node: &N,
        depth: usize,
        parent: Option<DiagramId>,
        out: &mut Projection,
    ) {
        let id = out.entries.len();
        out.rects.push(self.render_rect(node, depth));
        out.entries.push(DiagramEntry { id, parent });
        if node.is_leaf() || depth >= self.style.max_depth {
            return;
        }
        for child in node.children() {
            self.visit(&child, depth + 1, Some(id), out);
        }
    }

    fn render_rect<N: IndexNode>(&self, node: &N, depth: usize) -> RenderRect {
        let b = node.bounds();
        let rect = pixel_rect(&b);
        let flags = if rect[2] == 0 && rect[3] == 0 {
            DrawFlags::empty()
        } else {
            DrawFlags::STROKE | DrawFlags::LABEL
        };
        let height = node.height();
        let (color, alpha) = if depth == 0 {
            (self.style.root_color, self.style.root_alpha)
        } else {
            (self.palette_color(height), depth_alpha(depth))
        };
        RenderRect {
            color,
            alpha,
            rect,
            depth_marker: height,
            depth,
            flags,
        }
    }

    fn palette_color(&self, height: usize) -> Color {
        let palette = &self.style.palette;
        if palette.is_empty() {
            return self.style.root_color;
        }
        // (height - 1) mod len, without underflow at height 0.
        palette[(height % palette.len() + palette.len() - 1) % palette.len()]
    }
}

/// Alpha hint for a non-root node: strictly decreasing with depth.
pub fn depth_alpha(depth: usize) -> f64 {
    1.0 / (depth.max(1) as f64).powf(1.2)
}

fn pixel_rect(b: &PixelBox) -> [i64; 4] {
    [
        b.min_x,
        b.min_y,
        b.max_x.saturating_sub(b.min_x),
        b.max_y.saturating_sub(b.min_y),
    ]
}
