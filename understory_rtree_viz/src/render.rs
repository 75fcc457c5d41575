// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display-list rendering of a projected frame.
//!
//! The [`Renderer`] never touches a canvas. It turns a [`Scene`] into a list
//! of [`DrawCmd`] values that a host replays on whatever surface it has.
//! Command order is paint order:
//!
//! 1. one [`DrawCmd::Clear`] over the canvas,
//! 2. node outlines back-to-front (reverse projection order), each followed by
//!    its list-position label,
//! 3. the points, the highlighted one enlarged,
//! 4. the translucent selection preview, if any.
//!
//! Outlines flagged as invisible by the projector (zero width and height) are
//! skipped along with their labels.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Circle, Point, Rect, Size, Vec2};

use crate::projector::{DrawFlags, RenderRect};
use crate::types::{Color, PixelPoint};

/// Point, label and preview styling.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderStyle {
    /// Radius of an ordinary point.
    pub point_radius: f64,
    /// Radius multiplier for the highlighted point.
    pub highlight_scale: f64,
    /// Point fill.
    pub point_fill: Color,
    /// Point outline.
    pub point_stroke: Color,
    /// Selection preview fill.
    pub preview_color: Color,
    /// Selection preview opacity.
    pub preview_alpha: f64,
    /// Offset of a label from its rectangle's min corner.
    pub label_offset: Vec2,
    /// Leftward shift of a label per unit of the rectangle's height marker.
    pub label_step: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            point_radius: 5.0,
            highlight_scale: 2.0,
            point_fill: Color::AMBER,
            point_stroke: Color::CLAY,
            preview_color: Color::AMBER,
            preview_alpha: 0.2,
            label_offset: Vec2::new(25.0, 25.0),
            label_step: 20.0,
        }
    }
}

/// One paint operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// Clear the given area.
    Clear {
        /// Area to clear.
        rect: Rect,
    },
    /// Stroke a rectangle outline.
    StrokeRect {
        /// Outline geometry.
        rect: Rect,
        /// Stroke color.
        color: Color,
        /// Opacity hint.
        alpha: f64,
    },
    /// Draw text with its baseline origin at `origin`.
    Label {
        /// Text to draw.
        text: String,
        /// Baseline origin.
        origin: Point,
        /// Text color.
        color: Color,
    },
    /// Fill and stroke a circle.
    Circle {
        /// Geometry.
        circle: Circle,
        /// Fill color.
        fill: Color,
        /// Outline color.
        stroke: Color,
    },
    /// Fill a rectangle.
    FillRect {
        /// Geometry.
        rect: Rect,
        /// Fill color.
        color: Color,
        /// Opacity.
        alpha: f64,
    },
}

/// Everything one frame draws.
#[derive(Copy, Clone, Debug)]
pub struct Scene<'a> {
    /// Canvas size.
    pub canvas: Size,
    /// Projected node rectangles in projection order.
    pub rects: &'a [RenderRect],
    /// Stored points.
    pub points: &'a [PixelPoint],
    /// Point drawn enlarged, if any.
    pub highlight: Option<PixelPoint>,
    /// Live selection rectangle, if a drag is in progress.
    pub preview: Option<Rect>,
}

/// Stateless display-list builder.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    style: RenderStyle,
}

impl Renderer {
    /// Create a renderer with the given styling.
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    /// Styling in use.
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Build the display list for `scene`.
    pub fn draw(&self, scene: &Scene<'_>) -> Vec<DrawCmd> {
        let mut out = Vec::with_capacity(1 + 2 * scene.rects.len() + scene.points.len() + 1);
        out.push(DrawCmd::Clear {
            // One pixel of slack so strokes on the far edges are cleared too.
            rect: Rect::new(
                0.0,
                0.0,
                scene.canvas.width + 1.0,
                scene.canvas.height + 1.0,
            ),
        });

        for (i, r) in scene.rects.iter().enumerate().rev() {
            if r.flags.contains(DrawFlags::STROKE) {
                out.push(DrawCmd::StrokeRect {
                    rect: r.to_kurbo(),
                    color: r.color,
                    alpha: r.alpha,
                });
            }
            if r.flags.contains(DrawFlags::LABEL) {
                out.push(DrawCmd::Label {
                    text: i.to_string(),
                    origin: self.label_origin(r),
                    color: r.color,
                });
            }
        }

        for p in scene.points {
            let radius = if scene.highlight == Some(*p) {
                self.style.point_radius * self.style.highlight_scale
            } else {
                self.style.point_radius
            };
            out.push(DrawCmd::Circle {
                circle: Circle::new(p.to_kurbo(), radius),
                fill: self.style.point_fill,
                stroke: self.style.point_stroke,
            });
        }

        if let Some(preview) = scene.preview {
            out.push(DrawCmd::FillRect {
                rect: preview.abs(),
                color: self.style.preview_color,
                alpha: self.style.preview_alpha,
            });
        }
        out
    }

    fn label_origin(&self, r: &RenderRect) -> Point {
        let [x, y, _, _] = r.rect;
        Point::new(
            x as f64 - self.style.label_step * r.depth_marker as f64 + self.style.label_offset.x,
            y as f64 + self.style.label_offset.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i64, y: i64, w: i64, h: i64, marker: usize) -> RenderRect {
        RenderRect {
            color: Color::BLACK,
            alpha: 1.0,
            rect: [x, y, w, h],
            depth_marker: marker,
            depth: 1,
            flags: DrawFlags::STROKE | DrawFlags::LABEL,
        }
    }

    fn scene<'a>(rects: &'a [RenderRect], points: &'a [PixelPoint]) -> Scene<'a> {
        Scene {
            canvas: Size::new(700.0, 700.0),
            rects,
            points,
            highlight: None,
            preview: None,
        }
    }

    #[test]
    fn empty_frame_only_clears() {
        let cmds = Renderer::default().draw(&scene(&[], &[]));
        assert_eq!(
            cmds,
            [DrawCmd::Clear {
                rect: Rect::new(0.0, 0.0, 701.0, 701.0)
            }]
        );
    }

    #[test]
    fn rects_paint_back_to_front_with_list_labels() {
        let rects = [rect(0, 0, 100, 100, 2), rect(10, 10, 20, 20, 1)];
        let cmds = Renderer::default().draw(&scene(&rects, &[]));
        let labels: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Label { text, origin, .. } => Some((text.as_str(), *origin)),
                _ => None,
            })
            .collect();
        // The last rect is painted first; labels name the list position.
        assert_eq!(
            labels,
            [("1", Point::new(15.0, 35.0)), ("0", Point::new(-15.0, 25.0))]
        );
        assert!(matches!(
            cmds[1],
            DrawCmd::StrokeRect { rect, .. } if rect == Rect::new(10.0, 10.0, 30.0, 30.0)
        ));
    }

    #[test]
    fn invisible_rects_are_skipped() {
        let mut hidden = rect(5, 5, 0, 0, 1);
        hidden.flags = DrawFlags::empty();
        let rects = [rect(0, 0, 10, 10, 2), hidden];
        let cmds = Renderer::default().draw(&scene(&rects, &[]));
        let strokes = cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::StrokeRect { .. }))
            .count();
        assert_eq!(strokes, 1);
        assert!(
            !cmds
                .iter()
                .any(|c| matches!(c, DrawCmd::Label { text, .. } if text == "1"))
        );
    }

    #[test]
    fn highlighted_point_is_enlarged() {
        let points = [PixelPoint::new(10, 10), PixelPoint::new(20, 20)];
        let mut s = scene(&[], &points);
        s.highlight = Some(PixelPoint::new(20, 20));
        let radii: Vec<_> = Renderer::default()
            .draw(&s)
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Circle { circle, fill, .. } => {
                    assert_eq!(*fill, Color::AMBER);
                    Some(circle.radius)
                }
                _ => None,
            })
            .collect();
        assert_eq!(radii, [5.0, 10.0]);
    }

    #[test]
    fn preview_is_painted_last() {
        let points = [PixelPoint::new(1, 1)];
        let mut s = scene(&[], &points);
        s.preview = Some(Rect::new(30.0, 30.0, 10.0, 10.0));
        let cmds = Renderer::default().draw(&s);
        assert_eq!(
            cmds.last(),
            Some(&DrawCmd::FillRect {
                rect: Rect::new(10.0, 10.0, 30.0, 30.0),
                color: Color::AMBER,
                alpha: 0.2,
            })
        );
    }
}
