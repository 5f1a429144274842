//! Criterion benchmarks for fdm_core.
//!
//! Measures the exact coefficient solve across method orders, cached lookup,
//! and derivative evaluation at fixed and automatically chosen steps.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fdm_core::extrapolation::{extrapolate_fdm, ExtrapolationConfig};
use fdm_core::math::coefficients::{solve_coefficients, CoefficientCache};
use fdm_core::math::grids::central_grid;
use fdm_core::methods::{central_fdm, named_fdm, Direction, NamedConfig};

/// Benchmark the rational solve and cached lookups.
fn bench_coefficients(c: &mut Criterion) {
    let mut group = c.benchmark_group("coefficients");

    for p in [3, 5, 10, 20] {
        let grid = central_grid(p).unwrap();

        group.bench_with_input(BenchmarkId::new("solve", p), &grid, |b, grid| {
            b.iter(|| solve_coefficients(black_box(grid), 1).unwrap());
        });

        let cache = CoefficientCache::new();
        cache.get_or_solve(&grid, 1).unwrap();
        group.bench_with_input(BenchmarkId::new("cached", p), &grid, |b, grid| {
            b.iter(|| cache.get_or_solve(black_box(grid), 1).unwrap());
        });
    }

    group.finish();
}

/// Benchmark derivative evaluation.
fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");
    let f = |x: f64| x.sin();

    for p in [3, 5, 9] {
        let method = central_fdm(p, 1).unwrap();

        group.bench_with_input(BenchmarkId::new("fixed_step", p), &method, |b, m| {
            b.iter(|| m.evaluate(&f, black_box(1.0), 1e-3));
        });

        group.bench_with_input(BenchmarkId::new("auto_step", p), &method, |b, m| {
            b.iter(|| m.evaluate_auto(&f, black_box(1.0)));
        });
    }

    // Cost of deeper adaptive bounds
    for adapt in [0, 1, 2] {
        let config = NamedConfig::default().with_adapt(adapt);
        let method = named_fdm(Direction::Central, 5, 1, &config).unwrap();
        group.bench_with_input(BenchmarkId::new("adapt", adapt), &method, |b, m| {
            b.iter(|| m.evaluate_auto(&f, black_box(1.0)));
        });
    }

    group.finish();
}

/// Benchmark Richardson extrapolation of a three-point method.
fn bench_extrapolation(c: &mut Criterion) {
    let method = central_fdm(3, 1).unwrap();
    let config = ExtrapolationConfig::default();

    c.bench_function("extrapolate_central_3", |b| {
        b.iter(|| {
            extrapolate_fdm(&method, &|x: f64| x.sin(), black_box(1.0), None, &config).unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_coefficients,
    bench_evaluation,
    bench_extrapolation
);
criterion_main!(benches);
