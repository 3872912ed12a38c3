// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planar Snap Index: a tolerance-based 2D spatial index for snap targets.
//!
//! Planar Snap Index is a reusable building block for coincidence detection in
//! 2D drafting tools: "what stored points are near this cursor position" and
//! "what stored points lie in this region".
//!
//! - Insert points, each inflated to a small *tolerance box*, or arbitrary
//!   rectangular areas, each tagged with a strictly increasing sequence number.
//! - Query by point (tolerance-bounded approximate nearest neighbors) or by
//!   rectangle; results are the *centers* of stored boxes touching the query.
//! - Intersection is boundary-inclusive: an entry exactly on the query edge is
//!   a hit.
//!
//! The backing structure is an append-only R-tree, so queries are
//! `O(log n + k)`. Entries are never removed or moved; the whole index is
//! dropped with its owning document. Geometry types come from [`kurbo`].
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use planar_snap_index::SnapIndex;
//!
//! let mut idx = SnapIndex::new(1.0)?;
//! idx.insert_point(Point::new(0.0, 0.0));
//! idx.insert_point(Point::new(10.0, 10.0));
//!
//! // Within tolerance of (0, 0): one hit, the original point.
//! let hits = idx.nearest_neighbors(Point::new(0.1, 0.1));
//! assert_eq!(hits, vec![Point::new(0.0, 0.0)]);
//!
//! // Far from everything: no hits.
//! assert!(idx.nearest_neighbors(Point::new(5.0, 5.0)).is_empty());
//!
//! // Region query returns stored centers, boundary-inclusive.
//! let hits = idx.points_in_box(Rect::new(-1.0, -1.0, 11.0, 11.0));
//! assert_eq!(hits.len(), 2);
//! # Ok::<(), planar_snap_index::Error>(())
//! ```
//!
//! Bulk construction keeps insertion order and does not collapse coincident
//! points (multiple snap targets may legitimately share a position):
//!
//! ```rust
//! use kurbo::Point;
//! use planar_snap_index::SnapIndex;
//!
//! let p = Point::new(3.0, 4.0);
//! let idx = SnapIndex::from_points(&[p, p], 0.5)?;
//! assert_eq!(idx.len(), 2);
//! # Ok::<(), planar_snap_index::Error>(())
//! ```
//!
//! ## Float semantics
//!
//! Coordinates are `f64` and assumed finite (no NaNs). The tolerance is
//! validated at construction; everything after that is infallible.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod index;
mod rtree;

pub use index::{DEFAULT_TOLERANCE, Error, SnapIndex, Tag};
