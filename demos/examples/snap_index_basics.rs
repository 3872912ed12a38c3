// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap index basics.
//!
//! Build a small index, run a tolerance query and a region query.
//!
//! Run:
//! - `cargo run -p planar_demos --example snap_index_basics`

use kurbo::{Point, Rect};
use planar_snap_index::SnapIndex;

fn main() {
    env_logger::init();

    // Endpoints of a small drawing, indexed for snapping.
    let points = [
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 50.0),
        Point::new(0.0, 50.0),
    ];
    let mut idx = SnapIndex::from_points(&points, 1.0).expect("positive tolerance");

    // An area entry participates in queries through its center.
    let tag = idx.insert_area(Rect::new(40.0, 20.0, 60.0, 30.0));
    println!("indexed {} entries, last tag {}", idx.len(), tag.get());

    // Cursor near the origin corner: one snap candidate.
    let cursor = Point::new(0.3, -0.2);
    println!("near {cursor:?}: {:?}", idx.nearest_neighbors(cursor));

    // Cursor in the middle of nowhere: none.
    let cursor = Point::new(20.0, 20.0);
    println!("near {cursor:?}: {:?}", idx.nearest_neighbors(cursor));

    // Selection window over the left half.
    let window = Rect::new(-1.0, -1.0, 55.0, 51.0);
    println!("in {window:?}: {:?}", idx.points_in_box(window));
}
