// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Planar Snap Index: insert points, query by tolerance and box.

use kurbo::{Point, Rect};
use planar_snap_index::SnapIndex;

fn main() {
    let mut idx = SnapIndex::new(1.0).expect("positive tolerance");
    idx.insert_point(Point::new(0.0, 0.0));
    idx.insert_point(Point::new(10.0, 10.0));

    // Tolerance-bounded neighbor query
    let hits = idx.nearest_neighbors(Point::new(0.1, 0.1));
    println!("near (0.1, 0.1): {:?}", hits);

    // Region query
    let hits = idx.points_in_box(Rect::new(-1.0, -1.0, 11.0, 11.0));
    println!("in box: {:?}", hits);
}
