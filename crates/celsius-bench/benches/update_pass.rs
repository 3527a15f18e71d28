//! Criterion benchmarks for full update passes.

use std::hint::black_box;

use celsius_bench::{build_world, reference_profile, stress_profile, BENCH_MAP};
use celsius_engine::ThermalConfig;
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_update_10k(c: &mut Criterion) {
    let (mut world, mut host) = build_world(&reference_profile(), ThermalConfig::default(), 42);
    world.update(BENCH_MAP, &mut host).unwrap();

    c.bench_function("update_10k", |b| {
        b.iter(|| black_box(world.update(BENCH_MAP, &mut host).unwrap()));
    });
}

fn bench_update_62k(c: &mut Criterion) {
    let (mut world, mut host) = build_world(&stress_profile(), ThermalConfig::default(), 42);
    world.update(BENCH_MAP, &mut host).unwrap();

    c.bench_function("update_62k", |b| {
        b.iter(|| black_box(world.update(BENCH_MAP, &mut host).unwrap()));
    });
}

fn bench_diffusion_only_10k(c: &mut Criterion) {
    let config = ThermalConfig {
        freezing_and_melting: false,
        autoignition: false,
        terrain_temperatures: false,
        ..ThermalConfig::default()
    };
    let (mut world, mut host) = build_world(&reference_profile(), config, 42);

    c.bench_function("diffusion_only_10k", |b| {
        b.iter(|| black_box(world.update(BENCH_MAP, &mut host).unwrap()));
    });
}

fn bench_day_of_ticks_10k(c: &mut Criterion) {
    // One in-game day is 60000 ticks, so 240 update passes.
    c.bench_function("day_of_ticks_10k", |b| {
        b.iter(|| {
            let (mut world, mut host) =
                build_world(&reference_profile(), ThermalConfig::default(), 42);
            for tick in 0..60_000u64 {
                black_box(world.tick(BENCH_MAP, &mut host, tick).unwrap());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_update_10k,
    bench_update_62k,
    bench_diffusion_only_10k,
    bench_day_of_ticks_10k
);
criterion_main!(benches);
