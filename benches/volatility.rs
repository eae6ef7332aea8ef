//! Benchmarks for rolling volatility calculation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hist_vol::model::{StreamingVolatility, VolatilityEstimator};

fn prices(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 40000.0 + (i as f64 * 0.37).sin() * 1500.0)
        .collect()
}

fn benchmark_batch_30d(c: &mut Criterion) {
    let estimator = VolatilityEstimator::new();
    let series = prices(2000);

    c.bench_function("batch_volatility_30d", |b| {
        b.iter(|| estimator.compute(black_box(&series), 30))
    });
}

fn benchmark_batch_10d(c: &mut Criterion) {
    let estimator = VolatilityEstimator::new();
    let series = prices(2000);

    c.bench_function("batch_volatility_10d", |b| {
        b.iter(|| estimator.compute(black_box(&series), 10))
    });
}

fn benchmark_streaming(c: &mut Criterion) {
    let series = prices(2000);

    c.bench_function("streaming_volatility_30d", |b| {
        b.iter(|| {
            let mut estimator = StreamingVolatility::new(30).unwrap();
            for price in &series {
                estimator.update(black_box(*price)).unwrap();
            }
            estimator.estimate()
        })
    });
}

criterion_group!(
    benches,
    benchmark_batch_30d,
    benchmark_batch_10d,
    benchmark_streaming
);
criterion_main!(benches);
