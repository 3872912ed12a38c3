// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public [`SnapIndex`] API: tolerance-boxed points, tagged areas, and
//! boundary-inclusive queries.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use thiserror::Error;

use crate::rtree::RTree;

/// Default snap tolerance, matching the global geometric tolerance used by the
/// drafting layer for coincidence tests.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Construction errors for [`SnapIndex`].
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// The snap tolerance must be positive and finite.
    #[error("snap tolerance must be positive and finite, got {tolerance}")]
    InvalidTolerance {
        /// The rejected value.
        tolerance: f64,
    },
}

/// Insertion sequence number of a stored entry.
///
/// Tags are 0-based and strictly increasing; they are never reused (entries are
/// never removed). Coincident insertions each receive their own tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(u32);

impl Tag {
    pub(crate) const fn new(n: u32) -> Self {
        Self(n)
    }

    /// The raw sequence number.
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Tolerance-based 2D snap index.
///
/// Stores points (inflated to a tolerance box) and arbitrary areas, and answers
/// "what stored centers are near this point / inside this region" queries.
/// Nearness is bounded by the construction-time tolerance; this is an
/// all-candidates-within-a-box query, not a true k-NN.
///
/// Single-threaded by design: mutation and queries are expected to run on the
/// document thread, serialized externally if ever shared.
pub struct SnapIndex {
    tree: RTree,
    tolerance: f64,
    half: Vec2,
    next_tag: u32,
}

impl SnapIndex {
    /// Create an empty index.
    ///
    /// `tolerance` is the side length of the box a bare point is inflated to,
    /// for both insertion and nearest-neighbor queries. Non-positive or
    /// non-finite tolerances are rejected rather than clamped.
    pub fn new(tolerance: f64) -> Result<Self, Error> {
        if tolerance <= 0.0 || !tolerance.is_finite() {
            // NaN fails the finiteness check.
            return Err(Error::InvalidTolerance { tolerance });
        }
        Ok(Self {
            tree: RTree::default(),
            tolerance,
            half: Vec2::new(0.5 * tolerance, 0.5 * tolerance),
            next_tag: 0,
        })
    }

    /// Create an index pre-populated from `points`, inserted in order.
    ///
    /// Coincident points are not collapsed; each insertion gets its own tag.
    pub fn from_points(points: &[Point], tolerance: f64) -> Result<Self, Error> {
        let mut idx = Self::new(tolerance)?;
        for p in points {
            idx.insert_point(*p);
        }
        Ok(idx)
    }

    /// The configured tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// True if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    /// The tolerance box around `p`: a square of side `tolerance` centered on it.
    fn snap_box(&self, p: Point) -> Rect {
        Rect::from_points(p - self.half, p + self.half)
    }

    /// Insert a point, stored as its tolerance box. Never rejects; exact
    /// duplicates coexist (multiple coincident snap targets are legal).
    ///
    /// Returns the tag assigned to the entry.
    pub fn insert_point(&mut self, p: Point) -> Tag {
        self.insert_area(self.snap_box(p))
    }

    /// Insert an area as-is (no tolerance inflation). Never rejects.
    ///
    /// Returns the tag assigned to the entry. Degenerate (zero-area) rects are
    /// legal and behave as points or segments.
    pub fn insert_area(&mut self, area: Rect) -> Tag {
        let tag = Tag::new(self.next_tag);
        self.next_tag += 1;
        self.tree.insert(tag, area);
        tag
    }

    /// Centers of every stored box whose extent touches the tolerance box
    /// around `p`. Boundary-inclusive; order unspecified; duplicates possible
    /// when stored boxes share a center.
    ///
    /// For point insertions the center recovers the original point exactly
    /// (within floating-point rounding), since the stored box is symmetric
    /// around it.
    pub fn nearest_neighbors(&self, p: Point) -> Vec<Point> {
        self.points_in_box(self.snap_box(p))
    }

    /// Centers of every stored box touching `area`. Boundary-inclusive.
    pub fn points_in_box(&self, area: Rect) -> Vec<Point> {
        self.tree
            .search(&area)
            .into_iter()
            .map(|(_, bbox)| bbox.center())
            .collect()
    }
}

impl Default for SnapIndex {
    /// An empty index with [`DEFAULT_TOLERANCE`].
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE).expect("default tolerance is positive and finite")
    }
}

impl core::fmt::Debug for SnapIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SnapIndex")
            .field("tolerance", &self.tolerance)
            .field("len", &self.len())
            .field("next_tag", &self.next_tag)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_tolerances() {
        assert!(matches!(
            SnapIndex::new(0.0),
            Err(Error::InvalidTolerance { .. })
        ));
        assert!(matches!(
            SnapIndex::new(-1.0),
            Err(Error::InvalidTolerance { .. })
        ));
        assert!(matches!(
            SnapIndex::new(f64::NAN),
            Err(Error::InvalidTolerance { .. })
        ));
        assert!(matches!(
            SnapIndex::new(f64::INFINITY),
            Err(Error::InvalidTolerance { .. })
        ));
        assert!(SnapIndex::new(DEFAULT_TOLERANCE).is_ok());
    }

    #[test]
    fn tags_are_sequential_and_never_reused() {
        let mut idx = SnapIndex::new(1.0).unwrap();
        for i in 0..50_u32 {
            let tag = if i % 2 == 0 {
                idx.insert_point(Point::new(f64::from(i), 0.0))
            } else {
                idx.insert_area(Rect::new(0.0, 0.0, f64::from(i), 1.0))
            };
            assert_eq!(tag.get(), i);
        }
        assert_eq!(idx.len(), 50);
    }

    #[test]
    fn coincident_points_each_get_a_tag() {
        let p = Point::new(2.0, 3.0);
        let idx = SnapIndex::from_points(&[p, p, p], 1.0).unwrap();
        assert_eq!(idx.len(), 3);
        assert_eq!(idx.nearest_neighbors(p).len(), 3);
    }

    #[test]
    fn tolerance_round_trip() {
        let mut idx = SnapIndex::new(0.25).unwrap();
        let p = Point::new(1.5, -7.25);
        idx.insert_point(p);
        let hits = idx.nearest_neighbors(p);
        assert!(hits.iter().any(|q| (*q - p).hypot() < 1e-12));
    }

    #[test]
    fn nearest_neighbors_scenario() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        let idx = SnapIndex::from_points(&points, 1.0).unwrap();

        let hits = idx.nearest_neighbors(Point::new(0.1, 0.1));
        assert_eq!(hits.len(), 1);
        assert!((hits[0] - points[0]).hypot() < 1e-12);

        assert!(idx.nearest_neighbors(Point::new(5.0, 5.0)).is_empty());
    }

    #[test]
    fn point_on_query_edge_is_included() {
        let mut idx = SnapIndex::new(1.0).unwrap();
        // Stored box is [9.5, 10.5] x [-0.5, 0.5]; query ends exactly at 9.5.
        idx.insert_point(Point::new(10.0, 0.0));
        let hits = idx.points_in_box(Rect::new(0.0, -1.0, 9.5, 1.0));
        assert_eq!(hits.len(), 1);
        assert!((hits[0] - Point::new(10.0, 0.0)).hypot() < 1e-12);

        assert!(
            idx.points_in_box(Rect::new(0.0, -1.0, 9.4, 1.0)).is_empty(),
            "query short of the stored box must miss"
        );
    }

    #[test]
    fn area_insertions_report_their_center() {
        let mut idx = SnapIndex::new(1.0).unwrap();
        idx.insert_area(Rect::new(0.0, 0.0, 4.0, 2.0));
        let hits = idx.points_in_box(Rect::new(3.0, 1.0, 5.0, 3.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0], Point::new(2.0, 1.0));
    }

    #[test]
    fn queries_on_empty_index() {
        let idx = SnapIndex::new(1.0).unwrap();
        assert!(idx.is_empty());
        assert!(idx.nearest_neighbors(Point::new(0.0, 0.0)).is_empty());
        assert!(
            idx.points_in_box(Rect::new(-100.0, -100.0, 100.0, 100.0))
                .is_empty()
        );
    }

    #[test]
    fn many_points_stay_queryable() {
        let mut idx = SnapIndex::new(0.5).unwrap();
        for i in 0..30 {
            for j in 0..30 {
                idx.insert_point(Point::new(f64::from(i) * 5.0, f64::from(j) * 5.0));
            }
        }
        assert_eq!(idx.len(), 900);
        for i in 0..30 {
            let p = Point::new(f64::from(i) * 5.0, 50.0);
            let hits = idx.nearest_neighbors(p);
            assert_eq!(hits.len(), 1);
            assert!((hits[0] - p).hypot() < 1e-12);
        }
        // Window over one full column.
        let hits = idx.points_in_box(Rect::new(-1.0, -1.0, 1.0, 146.0));
        assert_eq!(hits.len(), 30);
    }
}
