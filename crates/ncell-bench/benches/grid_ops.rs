//! Criterion micro-benchmarks for grid store operations.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ncell_bench::dense_mask;
use ncell_core::{Cell, Neighbors};
use ncell_engine::hash::grid_hash;
use ncell_engine::seed::random_states;
use ncell_grid::{BufferRole, GridConfig, GridStore};

fn make_grid_100x100() -> GridStore {
    let mut grid = GridStore::new(GridConfig::uniform_border(&[100, 100], 2, 0)).unwrap();
    let states = random_states(&[100, 100], &[0, 1, 2, 3], 42).unwrap();
    grid.set_values_from_configuration(&states, None).unwrap();
    grid.flip();
    grid
}

fn bench_apply_mask(c: &mut Criterion) {
    let grid = make_grid_100x100();
    let (mask, _) = dense_mask(2, 5).unwrap();
    let mut scratch = Neighbors::new();

    c.bench_function("apply_mask_5x5_10k", |b| {
        b.iter(|| {
            for position in grid.positions() {
                // Mask origin is position - 2, which the border of 2 keeps in range.
                let origin = [position[0] - 2, position[1] - 2];
                grid.apply_mask_into(&origin, &mask, &mut scratch).unwrap();
                black_box(&scratch.states);
            }
        });
    });
}

fn bench_update_cell(c: &mut Criterion) {
    let mut grid = make_grid_100x100();
    let cell = Cell::new(1);

    c.bench_function("update_cell_10k", |b| {
        b.iter(|| {
            for position in grid.positions() {
                grid.update_cell(&position, &cell).unwrap();
            }
        });
    });
}

fn bench_snapshot_and_hash(c: &mut Criterion) {
    let grid = make_grid_100x100();

    c.bench_function("snapshot_10k", |b| {
        b.iter(|| black_box(grid.snapshot(BufferRole::Read)));
    });
    c.bench_function("grid_hash_10k", |b| {
        b.iter(|| black_box(grid_hash(&grid, BufferRole::Read)));
    });
}

criterion_group!(
    benches,
    bench_apply_mask,
    bench_update_cell,
    bench_snapshot_and_hash
);
criterion_main!(benches);
