//! Criterion benchmarks for the decomposition hot paths.
//!
//! Benchmarks:
//! 1. Exact decomposition across basket sizes
//! 2. Full tolerance search (worst case: unbounded budget, walk to collapse)
//! 3. Interpolation sequence generation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use slicelab_core::domain::Allocation;
use slicelab_core::engine::{decompose, interpolate, search_tolerance};

/// Distinct-weight basket: weights proportional to n, n-1, .., 1, scaled to
/// 100 so every step retires exactly one symbol (worst-case step count).
fn make_basket(n: usize) -> Allocation {
    Allocation::auto_scaled((0..n).map(|i| (format!("SYM{i:03}"), (i + 1) as f64)))
        .expect("positive weights")
}

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");
    for n in [5, 20, 100] {
        let basket = make_basket(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &basket, |b, basket| {
            b.iter(|| decompose(black_box(basket), 0.0));
        });
    }
    group.finish();
}

fn bench_tolerance_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("tolerance_search");
    for n in [5, 20, 100] {
        let basket = make_basket(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &basket, |b, basket| {
            b.iter(|| search_tolerance(black_box(basket), 10_000.0, f64::INFINITY));
        });
    }
    group.finish();
}

fn bench_interpolate(c: &mut Criterion) {
    let basket = make_basket(50);
    c.bench_function("interpolate_50", |b| {
        b.iter(|| interpolate(black_box(&basket)));
    });
}

criterion_group!(
    benches,
    bench_decompose,
    bench_tolerance_search,
    bench_interpolate
);
criterion_main!(benches);
