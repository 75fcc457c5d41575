// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point list mirrored into a spatial index.
//!
//! [`PointStore`] owns both the insertion-ordered point list and the index, so
//! the only way to change either is through operations that change both:
//!
//! - every stored point has exactly one degenerate box in the index, and the
//!   index holds nothing else;
//! - no two stored points share both coordinates. Duplicate adds are rejected
//!   without touching either side.
//!
//! ## Example
//!
//! ```
//! use understory_rtree::RTree;
//! use understory_rtree_viz::store::{PointStore, StoreError};
//! use understory_rtree_viz::types::{PixelBox, PixelPoint};
//!
//! let mut store = PointStore::new(RTree::<i64>::new());
//! store.try_add(PixelPoint::new(10, 10)).unwrap();
//! assert_eq!(
//!     store.try_add(PixelPoint::new(10, 10)),
//!     Err(StoreError::DuplicateCoordinate(PixelPoint::new(10, 10)))
//! );
//! store.try_add(PixelPoint::new(20, 20)).unwrap();
//!
//! let removed = store.remove_region(&PixelBox::new(5, 5, 25, 25));
//! assert_eq!(removed.len(), 2);
//! assert!(store.is_empty());
//! assert!(store.index().is_empty());
//! ```

use alloc::vec::Vec;
use core::fmt;

use crate::index::SpatialIndex;
use crate::random::XorShift64;
use crate::types::{PixelBox, PixelPoint};

/// Why a store operation left state unchanged.
///
/// None of these are fatal; callers typically log and move on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// A point with the same coordinates is already stored.
    DuplicateCoordinate(PixelPoint),
    /// No stored point has these coordinates.
    NotFound(PixelPoint),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCoordinate(p) => {
                write!(f, "a point is already stored at ({}, {})", p.x, p.y)
            }
            Self::NotFound(p) => write!(f, "no point is stored at ({}, {})", p.x, p.y),
        }
    }
}

impl core::error::Error for StoreError {}

/// Insertion-ordered points kept in lockstep with a spatial index.
#[derive(Debug, Default)]
pub struct PointStore<I> {
    points: Vec<PixelPoint>,
    index: I,
}

impl<I: SpatialIndex> PointStore<I> {
    /// Wrap an index. The index is expected to be empty.
    pub fn new(index: I) -> Self {
        Self {
            points: Vec::new(),
            index,
        }
    }

    /// Points in insertion order.
    pub fn points(&self) -> &[PixelPoint] {
        &self.points
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no points are stored.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether a point with these coordinates is stored.
    pub fn contains(&self, p: PixelPoint) -> bool {
        self.points.contains(&p)
    }

    /// The most recently added point still stored.
    pub fn newest(&self) -> Option<PixelPoint> {
        self.points.last().copied()
    }

    /// Read-only access to the index, e.g. for projection.
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Add a point unless one with the same coordinates exists.
    pub fn try_add(&mut self, p: PixelPoint) -> Result<(), StoreError> {
        if self.contains(p) {
            return Err(StoreError::DuplicateCoordinate(p));
        }
        self.index.insert_point(p);
        self.points.push(p);
        Ok(())
    }

    /// Remove the point with these coordinates from both the list and the index.
    ///
    /// The index is only called when the point is stored.
    pub fn remove_point(&mut self, p: PixelPoint) -> Result<(), StoreError> {
        let Some(pos) = self.points.iter().position(|q| *q == p) else {
            return Err(StoreError::NotFound(p));
        };
        self.index.remove_point(p);
        let _ = self.points.remove(pos);
        Ok(())
    }

    /// Run an index search and remove every result, keyed by its min corner.
    ///
    /// Returns the points that were removed, in search-result order.
    pub fn remove_region(&mut self, region: &PixelBox) -> Vec<PixelPoint> {
        let hits = self.index.search(region);
        let mut removed = Vec::with_capacity(hits.len());
        for hit in &hits {
            let p = PixelPoint::min_corner(hit);
            match self.remove_point(p) {
                Ok(()) => removed.push(p),
                Err(e) => log::debug!("skipping search result: {e}"),
            }
        }
        removed
    }

    /// Remove up to `n` points, most recently added first.
    ///
    /// Stops early when the store runs out. Returns the removed points, newest first.
    pub fn delete_newest(&mut self, n: usize) -> Vec<PixelPoint> {
        let mut removed = Vec::new();
        while removed.len() < n {
            let Some(p) = self.newest() else {
                break;
            };
            if self.remove_point(p).is_err() {
                break;
            }
            removed.push(p);
        }
        removed
    }

    /// Add up to `n` points uniformly scattered over `[0, width] x [0, height]`.
    ///
    /// Draws that land on an occupied coordinate are dropped. Returns the points added.
    pub fn add_random(
        &mut self,
        n: usize,
        width: i64,
        height: i64,
        rng: &mut XorShift64,
    ) -> Vec<PixelPoint> {
        let mut added = Vec::new();
        for _ in 0..n {
            let p = PixelPoint::new(rng.next_inclusive(width), rng.next_inclusive(height));
            match self.try_add(p) {
                Ok(()) => added.push(p),
                Err(e) => log::debug!("random point dropped: {e}"),
            }
        }
        added
    }

    /// Remove every point, pairing each with an index removal.
    pub fn clear(&mut self) {
        let _ = self.delete_newest(self.points.len());
    }
}
