//! Incremental volatility estimation
//!
//! Prices arrive oldest-first, so each return is `ln(new / previous)`.
//! After feeding a series in chronological order, `estimate()` equals the
//! first value of the batch estimator run on the same series newest-first.

use super::volatility::{sample_std_dev, standard_error, CALENDAR_DAYS_PER_YEAR};
use super::VolatilityError;
use std::collections::VecDeque;

/// Rolling volatility over the last `window` log returns
#[derive(Debug, Clone)]
pub struct StreamingVolatility {
    /// Number of returns per estimate
    window: usize,
    /// Annualization multiplier
    factor: f64,
    /// Last accepted price
    last_price: Option<f64>,
    /// Prices accepted so far
    observations: usize,
    /// Most recent returns, oldest at the front
    returns: VecDeque<f64>,
}

impl StreamingVolatility {
    /// Create a calendar-day annualized streaming estimator
    pub fn new(window: usize) -> Result<Self, VolatilityError> {
        Self::with_periods_per_year(window, CALENDAR_DAYS_PER_YEAR)
    }

    /// Create an estimator with a custom annualization period count
    pub fn with_periods_per_year(
        window: usize,
        periods_per_year: u32,
    ) -> Result<Self, VolatilityError> {
        if window < 2 {
            return Err(VolatilityError::Config(
                "window must cover at least two returns".to_string(),
            ));
        }
        if periods_per_year == 0 {
            return Err(VolatilityError::Config(
                "periods per year must be positive".to_string(),
            ));
        }

        Ok(Self {
            window,
            factor: (periods_per_year as f64).sqrt(),
            last_price: None,
            observations: 0,
            returns: VecDeque::with_capacity(window + 1),
        })
    }

    /// Add the next (newer) price observation
    pub fn update(&mut self, price: f64) -> Result<(), VolatilityError> {
        if !(price.is_finite() && price > 0.0) {
            return Err(VolatilityError::Domain {
                index: self.observations,
                price,
            });
        }

        if let Some(prev) = self.last_price {
            self.returns.push_back(price.ln() - prev.ln());
            if self.returns.len() > self.window {
                self.returns.pop_front();
            }
        }
        self.last_price = Some(price);
        self.observations += 1;

        Ok(())
    }

    /// Annualized volatility of the current window, once it is full
    pub fn estimate(&self) -> Option<f64> {
        if self.returns.len() < self.window {
            return None;
        }

        // Newest-first to match the batch estimator's summation order
        let window: Vec<f64> = self.returns.iter().rev().copied().collect();
        sample_std_dev(&window).map(|s| s * self.factor)
    }

    /// Standard error of the current estimate
    pub fn standard_error(&self) -> Option<f64> {
        standard_error(self.estimate()?, self.returns.len())
    }

    /// Returns currently held
    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Prices accepted since creation
    pub fn observations(&self) -> usize {
        self.observations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VolatilityEstimator;

    #[test]
    fn test_streaming_new() {
        let estimator = StreamingVolatility::new(5).unwrap();
        assert!(estimator.estimate().is_none()); // Empty estimator
        assert!(estimator.is_empty());
    }

    #[test]
    fn test_streaming_rejects_small_window() {
        assert!(StreamingVolatility::new(0).is_err());
        assert!(StreamingVolatility::new(1).is_err());
    }

    #[test]
    fn test_streaming_single_price() {
        let mut estimator = StreamingVolatility::new(2).unwrap();
        estimator.update(100000.0).unwrap();
        // Single price cannot calculate volatility
        assert!(estimator.estimate().is_none());
    }

    #[test]
    fn test_streaming_needs_full_window() {
        let mut estimator = StreamingVolatility::new(3).unwrap();
        for price in [100.0, 101.0, 99.0] {
            estimator.update(price).unwrap();
        }
        assert!(estimator.estimate().is_none());

        estimator.update(102.0).unwrap();
        assert!(estimator.estimate().is_some());
    }

    #[test]
    fn test_streaming_matches_batch() {
        // Oldest-first
        let chronological = [100.0, 90.0, 100.0, 110.0];
        let mut estimator = StreamingVolatility::new(2).unwrap();
        for price in chronological {
            estimator.update(price).unwrap();
        }

        let newest_first: Vec<f64> = chronological.iter().rev().copied().collect();
        let batch = VolatilityEstimator::new().compute(&newest_first, 2).unwrap();

        let streamed = estimator.estimate().unwrap();
        assert!((streamed - batch[0]).abs() < 1e-12);
    }

    #[test]
    fn test_streaming_window_expiry() {
        let mut estimator = StreamingVolatility::new(3).unwrap();
        for price in [100.0, 150.0, 80.0, 100.0, 100.0, 100.0, 100.0] {
            estimator.update(price).unwrap();
        }
        // Only the flat tail remains in the window
        assert_eq!(estimator.len(), 3);
        assert_eq!(estimator.estimate(), Some(0.0));
    }

    #[test]
    fn test_streaming_rejects_non_positive() {
        let mut estimator = StreamingVolatility::new(2).unwrap();
        estimator.update(100.0).unwrap();
        let err = estimator.update(0.0).unwrap_err();
        assert_eq!(
            err,
            VolatilityError::Domain {
                index: 1,
                price: 0.0
            }
        );
        // Rejected price leaves state untouched
        assert!(estimator.is_empty());
    }

    #[test]
    fn test_streaming_extreme_ratio_stays_finite() {
        let mut estimator = StreamingVolatility::new(2).unwrap();
        for price in [2.0, 1.0, 5e-324, 1.0] {
            estimator.update(price).unwrap();
        }
        assert!(estimator.estimate().unwrap().is_finite());
    }

    #[test]
    fn test_streaming_standard_error() {
        let mut estimator = StreamingVolatility::new(4).unwrap();
        for i in 0..10 {
            let price = 100000.0 + (i * i) as f64 * 10.0;
            estimator.update(price).unwrap();
        }

        let se = estimator.standard_error();
        assert!(se.is_some());
        assert!(se.unwrap() > 0.0);
    }
}
