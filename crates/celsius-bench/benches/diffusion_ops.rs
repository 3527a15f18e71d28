//! Criterion micro-benchmarks for the exchange formulas.

use std::hint::black_box;

use celsius_core::ThermalProperties;
use celsius_diffusion::DiffusionEngine;
use criterion::{criterion_group, criterion_main, Criterion};

const WALL: ThermalProperties = ThermalProperties::new(2500.0, 1.5);

fn bench_mutual(c: &mut Criterion) {
    let engine = DiffusionEngine::builder().build().unwrap();
    let air = engine.air();

    c.bench_function("mutual_air_air", |b| {
        b.iter(|| black_box(engine.diffuse_mutual(black_box(20.0), air, black_box(35.0), air)));
    });
    c.bench_function("mutual_air_wall", |b| {
        b.iter(|| black_box(engine.diffuse_mutual(black_box(20.0), air, black_box(35.0), WALL)));
    });
}

fn bench_single(c: &mut Criterion) {
    let engine = DiffusionEngine::builder().build().unwrap();

    c.bench_function("single_wall_outdoor", |b| {
        b.iter(|| black_box(engine.diffuse_single(black_box(20.0), black_box(-5.0), WALL)));
    });
}

criterion_group!(benches, bench_mutual, bench_single);
criterion_main!(benches);
