// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use planar_snap_index::SnapIndex;

fn gen_grid_points(n: usize, spacing: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Point::new(x as f64 * spacing, y as f64 * spacing));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1_u64 << 53) as f64)
    }
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap_index_insert");
    for n in [32_usize, 64, 128] {
        let points = gen_grid_points(n, 10.0);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("grid_{}x{}", n, n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let mut idx = SnapIndex::new(1.0).unwrap();
                    for p in points {
                        black_box(idx.insert_point(p));
                    }
                    idx
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_nearest_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap_index_nearest_neighbors");
    for n in [32_usize, 64, 128] {
        let points = gen_grid_points(n, 10.0);
        let idx = SnapIndex::from_points(&points, 1.0).unwrap();
        let mut rng = Rng::new(0x5EED);
        let extent = n as f64 * 10.0;
        let queries: Vec<Point> = (0..1024)
            .map(|_| Point::new(rng.next_f64() * extent, rng.next_f64() * extent))
            .collect();
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("grid_{}x{}", n, n), |b| {
            let mut i = 0_usize;
            b.iter(|| {
                let q = queries[i % queries.len()];
                i += 1;
                black_box(idx.nearest_neighbors(q))
            });
        });
    }
    group.finish();
}

fn bench_points_in_box(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap_index_points_in_box");
    for n in [32_usize, 64, 128] {
        let points = gen_grid_points(n, 10.0);
        let idx = SnapIndex::from_points(&points, 1.0).unwrap();
        // A window covering roughly a quarter of the extent.
        let extent = n as f64 * 10.0;
        let window = Rect::new(0.0, 0.0, extent * 0.5, extent * 0.5);
        group.bench_function(format!("grid_{}x{}", n, n), |b| {
            b.iter(|| black_box(idx.points_in_box(window)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_nearest_neighbors,
    bench_points_in_box
);
criterion_main!(benches);
