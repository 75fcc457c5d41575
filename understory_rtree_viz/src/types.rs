// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value types shared by the store, projector, and renderer.

use core::fmt;

use understory_rtree::Aabb2D;

/// Box in integer pixel space, as stored in the index.
pub type PixelBox = Aabb2D<i64>;

/// A point in integer pixel coordinates.
///
/// Points are values: two points are the same point exactly when both
/// coordinates match. In the index a point is stored as a degenerate box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PixelPoint {
    /// Horizontal coordinate, growing right.
    pub x: i64,
    /// Vertical coordinate, growing down.
    pub y: i64,
}

impl PixelPoint {
    /// Create a point.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Snap a pointer position to the nearest pixel.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Pointer positions are canvas-sized; rounding to whole pixels is the intent."
    )]
    pub fn from_kurbo(p: kurbo::Point) -> Self {
        Self {
            x: p.x.round() as i64,
            y: p.y.round() as i64,
        }
    }

    /// The pixel position as a Kurbo point.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x as f64, self.y as f64)
    }

    /// The degenerate box representing this point in the index.
    pub const fn to_box(self) -> PixelBox {
        Aabb2D::point(self.x, self.y)
    }

    /// The min corner of a box, used as the point key of a search result.
    pub const fn min_corner(b: &PixelBox) -> Self {
        Self {
            x: b.min_x,
            y: b.min_y,
        }
    }
}

impl fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X: {}, Y: {}", self.x, self.y)
    }
}

impl From<(i64, i64)> for PixelPoint {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// Snap a Kurbo rectangle to the enclosing-by-rounding pixel box.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Selection rectangles are canvas-sized; rounding to whole pixels is the intent."
)]
pub fn rect_to_pixel_box(r: kurbo::Rect) -> PixelBox {
    let r = r.abs();
    Aabb2D::new(
        r.x0.round() as i64,
        r.y0.round() as i64,
        r.x1.round() as i64,
        r.y1.round() as i64,
    )
}

/// An opaque RGB color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// `black`
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    /// `white`
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    /// Dark brown used for the third hierarchy level.
    pub const UMBER: Self = Self::rgb(0x72, 0x53, 0x00);
    /// Root outline highlight.
    pub const HIGHLIGHT: Self = Self::rgb(0xFF, 0xDB, 0x7A);
    /// Point fill.
    pub const AMBER: Self = Self::rgb(0xFF, 0xCA, 0x3A);
    /// Point outline.
    pub const CLAY: Self = Self::rgb(0xCA, 0x89, 0x5F);

    /// Create a color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    /// CSS hex notation, e.g. `#ffdb7a`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_positions_round_to_pixels() {
        let p = PixelPoint::from_kurbo(kurbo::Point::new(10.4, 19.6));
        assert_eq!(p, PixelPoint::new(10, 20));
        assert_eq!(p.to_box(), Aabb2D::new(10, 20, 10, 20));
    }

    #[test]
    fn reversed_rects_normalize() {
        let b = rect_to_pixel_box(kurbo::Rect::new(25.0, 25.0, 5.0, 5.0));
        assert_eq!(b, Aabb2D::new(5, 5, 25, 25));
    }

    #[test]
    fn colors_format_as_css_hex() {
        assert_eq!(Color::HIGHLIGHT.to_string(), "#ffdb7a");
        assert_eq!(Color::UMBER.to_string(), "#725300");
    }

    #[test]
    fn points_display_as_readout() {
        assert_eq!(PixelPoint::new(3, -4).to_string(), "X: 3, Y: -4");
    }
}
