//! Benchmarks for the grid searches.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use riskgrid_core::{CostGrid, Point, tiling};
use riskgrid_paths::{PathFinder, shortest_path};

/// Deterministic 1..=9 cost field (no RNG dependency needed).
fn field(width: i32, height: i32) -> CostGrid {
    let cells = (0..width as i64 * height as i64)
        .map(|i| (i * 2654435761 % 9 + 1) as i32)
        .collect();
    CostGrid::from_flat(width, height, cells).unwrap()
}

/// Benchmark a corner-to-corner search with a fresh finder per query.
fn bench_corner_to_corner(c: &mut Criterion) {
    let g = field(100, 100);
    c.bench_function("shortest_path_100", |b| {
        b.iter(|| shortest_path(black_box(&g)))
    });
}

/// Benchmark repeated searches through one cache-owning finder.
fn bench_reused_finder(c: &mut Criterion) {
    let g = field(250, 250);
    let mut pf = PathFinder::for_grid(&g);
    let to = g.bottom_right();
    c.bench_function("shortest_path_reused_250", |b| {
        b.iter(|| pf.shortest_path(black_box(&g), Point::ZERO, to))
    });
}

/// Benchmark tiled expansion of a base field.
fn bench_expand(c: &mut Criterion) {
    let base = field(100, 100);
    c.bench_function("expand_5x", |b| {
        b.iter(|| tiling::expand(black_box(&base), 5))
    });
}

/// Benchmark a full-field multi-source distance map.
fn bench_dijkstra_map(c: &mut Criterion) {
    let g = field(100, 100);
    let mut pf = PathFinder::for_grid(&g);
    let center = [Point::new(50, 50)];
    c.bench_function("dijkstra_map_100", |b| {
        b.iter(|| pf.dijkstra_map(black_box(&g), &center, i32::MAX).len())
    });
}

criterion_group!(
    benches,
    bench_corner_to_corner,
    bench_reused_finder,
    bench_expand,
    bench_dijkstra_map
);
criterion_main!(benches);
