//! Benchmarks for dashboard formatting helpers
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plant_dashboard::utils::{format_decimal, format_number};

fn bench_format_number(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_number");

    for value in [12_i64, 1_234_567, i64::MAX] {
        group.bench_function(format!("int_{}", value), |b| {
            b.iter(|| format_number(black_box(value)))
        });
    }

    group.bench_function("decimal", |b| {
        b.iter(|| format_decimal(black_box(9_876_543.21)))
    });

    group.finish();
}

criterion_group!(benches, bench_format_number);
criterion_main!(benches);
