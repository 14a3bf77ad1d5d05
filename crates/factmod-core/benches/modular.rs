//! Criterion benchmarks for modular multiplication and range products.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use factmod_core::modular::mul_mod;
use factmod_core::product::{parallel_range_product, range_product};
use factmod_core::range::Range;

const MODULUS: u64 = 1_000_000_007;

fn bench_mul_mod(c: &mut Criterion) {
    let mut group = c.benchmark_group("MulMod");
    for &m in &[MODULUS, u64::MAX - 58] {
        group.bench_with_input(BenchmarkId::from_parameter(m), &m, |b, &m| {
            b.iter(|| mul_mod(black_box(m - 1), black_box(m - 2), m));
        });
    }
    group.finish();
}

fn bench_range_product(c: &mut Criterion) {
    let ks: Vec<u64> = vec![1_000, 100_000];

    let mut group = c.benchmark_group("RangeProduct");
    for &k in &ks {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| range_product(Range::new(1, k), MODULUS));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("ParallelRangeProduct");
    for &k in &ks {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| parallel_range_product(Range::new(1, k), MODULUS, 4).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_mul_mod, bench_range_product);
criterion_main!(benches);
