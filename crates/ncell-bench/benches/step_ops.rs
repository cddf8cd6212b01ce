//! Criterion benchmarks for full automaton steps.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ncell_bench::{euclidean_profile, life_profile, wolfram_profile};
use ncell_engine::StepMode;

fn bench_life_step_10k(c: &mut Criterion) {
    let mut life = life_profile(100, 42, StepMode::Sequential).unwrap();
    // Warm up: one step so the scratch buffer is sized
    life.next_step().unwrap();

    c.bench_function("life_step_10k", |b| {
        b.iter(|| {
            life.next_step().unwrap();
            black_box(life.last_metrics());
        });
    });
}

fn bench_life_step_250k_sequential_vs_parallel(c: &mut Criterion) {
    let mut seq = life_profile(500, 42, StepMode::Sequential).unwrap();
    let mut par = life_profile(500, 42, StepMode::Parallel { threads: None }).unwrap();

    let mut group = c.benchmark_group("life_step_250k");
    group.sample_size(20);
    group.bench_function("sequential", |b| {
        b.iter(|| seq.next_step().unwrap());
    });
    group.bench_function("parallel", |b| {
        b.iter(|| par.next_step_parallel().unwrap());
    });
    group.finish();
}

fn bench_wolfram_100_steps(c: &mut Criterion) {
    c.bench_function("wolfram_110_100_steps_4k", |b| {
        b.iter(|| {
            let mut line = wolfram_profile(4096, 7).unwrap();
            line.run(100).unwrap();
            black_box(line.current_states());
        });
    });
}

fn bench_euclidean_3d(c: &mut Criterion) {
    let mut ball = euclidean_profile(24, 9, StepMode::Parallel { threads: None }).unwrap();
    c.bench_function("euclidean_r2_step_13k", |b| {
        b.iter(|| {
            ball.run(1).unwrap();
            black_box(ball.last_metrics());
        });
    });
}

criterion_group!(
    benches,
    bench_life_step_10k,
    bench_life_step_250k_sequential_vs_parallel,
    bench_wolfram_100_steps,
    bench_euclidean_3d
);
criterion_main!(benches);
