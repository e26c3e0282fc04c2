//! Benchmarks for discount factor queries.
//!
//! Run with: cargo bench -p tasa-curves

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use tasa_core::prelude::*;
use tasa_curves::prelude::*;

fn create_test_curve(curve_date: Date) -> ZeroCouponCurve {
    let conv = RateConvention::default();
    let points = [(3, 0.030), (6, 0.032), (12, 0.035), (24, 0.038), (60, 0.045), (120, 0.050), (360, 0.055)]
        .into_iter()
        .map(|(months, rate)| {
            let date = curve_date.add_months(months).unwrap();
            ZeroCouponCurvePoint::new(date, Rate::new(conv, rate))
        })
        .collect();
    ZeroCouponCurve::new(curve_date, points).unwrap()
}

fn bench_get_dfs(c: &mut Criterion) {
    let curve_date = Date::from_ymd(2024, 1, 2).unwrap();
    let curve = create_test_curve(curve_date);
    let mut group = c.benchmark_group("get_dfs");

    for size in [10usize, 100, 1_000] {
        let dates: Vec<Date> = (1..=size).map(|i| curve_date.add_days(i as i64 * 11)).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("cold", size), &dates, |b, dates| {
            b.iter(|| curve.clone().get_dfs(black_box(dates)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("cached", size), &dates, |b, dates| {
            b.iter(|| curve.get_dfs(black_box(dates)).unwrap());
        });
    }
    group.finish();
}

fn bench_bump(c: &mut Criterion) {
    let curve_date = Date::from_ymd(2024, 1, 2).unwrap();
    let mut curve = create_test_curve(curve_date);
    let date = curve_date.add_months(30).unwrap();

    c.bench_function("bump_guard_df", |b| {
        b.iter(|| {
            let guard = curve.bump(black_box(1.0)).unwrap();
            guard.get_df(date).unwrap()
        });
    });
}

criterion_group!(benches, bench_get_dfs, bench_bump);
criterion_main!(benches);
