//! Integration tests for the volatility estimator

use hist_vol::model::{StreamingVolatility, VolatilityError, VolatilityEstimator};

/// Newest-first synthetic daily closes
fn synthetic_prices(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 30000.0 * (1.0 + 0.03 * ((i as f64) * 0.9).sin() + 0.01 * (i % 7) as f64))
        .collect()
}

#[test]
fn test_reference_series() {
    let vols = VolatilityEstimator::new()
        .compute(&[110.0, 100.0, 90.0, 100.0], 2)
        .unwrap();
    assert_eq!(vols.len(), 2);
    assert!((vols[0] - 0.1358).abs() < 1e-3);
    assert!((vols[1] - 2.8467).abs() < 1e-3);
}

#[test]
fn test_length_and_sign_over_windows() {
    let prices = synthetic_prices(120);
    let estimator = VolatilityEstimator::new();

    let mut previous_len = usize::MAX;
    for window in [2, 5, 10, 30, 60, 119, 120, 200] {
        let vols = estimator.compute(&prices, window).unwrap();
        assert_eq!(vols.len(), prices.len().saturating_sub(window));
        assert!(vols.len() <= previous_len);
        assert!(vols.iter().all(|v| *v >= 0.0 && v.is_finite()));
        previous_len = vols.len();
    }
}

#[test]
fn test_streaming_tracks_batch_along_series() {
    let newest_first = synthetic_prices(60);
    let window = 10;
    let batch = VolatilityEstimator::new()
        .compute(&newest_first, window)
        .unwrap();

    // Replay oldest-first; each full window lines up with a batch offset
    let mut streaming = StreamingVolatility::new(window).unwrap();
    for (step, price) in newest_first.iter().rev().enumerate() {
        streaming.update(*price).unwrap();
        if let Some(vol) = streaming.estimate() {
            let offset = newest_first.len() - 1 - step;
            assert!((vol - batch[offset]).abs() < 1e-12, "offset {offset}");
        }
    }
}

#[test]
fn test_domain_error_reports_offending_price() {
    let err = VolatilityEstimator::new()
        .compute(&[100.0, -5.0, 90.0], 1)
        .unwrap_err();
    assert!(err.is_domain());
    assert!(err.to_string().contains("non-positive price"));
}

#[test]
fn test_short_series_is_not_an_error() {
    let vols = VolatilityEstimator::new().compute(&[100.0, 101.0], 5);
    assert_eq!(vols, Ok(vec![]));
}

#[test]
fn test_zero_window_is_config_error() {
    let err = VolatilityEstimator::new()
        .compute(&[100.0, 101.0], 0)
        .unwrap_err();
    assert!(matches!(err, VolatilityError::Config(_)));
}
