use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pathing_core::{SquareGrid, VisibilityEngine};

fn criterion_sparse_occluders(c: &mut Criterion) {
    let grid = SquareGrid::new(40, 40);
    let engine = VisibilityEngine::default();
    // A scattering of pillars, none of which fully enclose the viewpoint.
    let is_opaque = |n: (i32, i32)| n.0 % 7 == 3 && n.1 % 5 == 2;

    c.bench_function("visibility 40x40 sparse occluders", |b| {
        b.iter(|| {
            black_box(engine.search(&grid, (20, 20), is_opaque, 0.0));
        })
    });
}

fn criterion_dense_occluders(c: &mut Criterion) {
    let grid = SquareGrid::new(40, 40);
    let engine = VisibilityEngine::with_threshold(0.5);
    let is_opaque = |n: (i32, i32)| (n.0 + n.1) % 3 == 0;

    c.bench_function("visibility 40x40 dense occluders", |b| {
        b.iter(|| {
            black_box(engine.search(&grid, (20, 20), is_opaque, 15.0));
        })
    });
}

criterion_group!(benches, criterion_sparse_occluders, criterion_dense_occluders);
criterion_main!(benches);
