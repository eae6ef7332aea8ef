//! Volatility estimation module
//!
//! Rolling realized volatility from daily log returns. Prices are ordered
//! newest-first: index 0 is the most recent close, and each return is the
//! log of the newer price over the next-older one.

use super::VolatilityError;

/// Periods per year for assets trading every calendar day (crypto)
pub const CALENDAR_DAYS_PER_YEAR: u32 = 365;

/// Periods per year for exchange-traded equities
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Rolling historical volatility estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityEstimator {
    /// Return periods per year used for annualization
    periods_per_year: u32,
}

impl VolatilityEstimator {
    /// Create an estimator annualizing over calendar days
    pub fn new() -> Self {
        Self {
            periods_per_year: CALENDAR_DAYS_PER_YEAR,
        }
    }

    /// Create an estimator with a custom annualization period count
    pub fn with_periods_per_year(periods_per_year: u32) -> Result<Self, VolatilityError> {
        if periods_per_year == 0 {
            return Err(VolatilityError::Config(
                "periods per year must be positive".to_string(),
            ));
        }
        Ok(Self { periods_per_year })
    }

    /// Return periods per year
    pub fn periods_per_year(&self) -> u32 {
        self.periods_per_year
    }

    /// Multiplier turning a per-period standard deviation into an annual one
    pub fn annualization_factor(&self) -> f64 {
        (self.periods_per_year as f64).sqrt()
    }

    /// Calculate the rolling annualized volatility series
    ///
    /// Output entry `i` covers returns `i..i + window` and aligns with the
    /// date of `prices[i]`. The output holds `prices.len() - window` values,
    /// or none when the series is not longer than the window.
    ///
    /// # Errors
    /// * `VolatilityError::Config` when `window` is 0, or 1 (a sample
    ///   standard deviation needs two returns)
    /// * `VolatilityError::Domain` when any price is not strictly positive
    pub fn compute(&self, prices: &[f64], window: usize) -> Result<Vec<f64>, VolatilityError> {
        if window == 0 {
            return Err(VolatilityError::Config(
                "window must be positive".to_string(),
            ));
        }

        let returns = log_returns(prices)?;

        if window == 1 {
            return Err(VolatilityError::Config(
                "window must cover at least two returns".to_string(),
            ));
        }

        if prices.len() <= window {
            return Ok(Vec::new());
        }

        let factor = self.annualization_factor();
        let vols = (0..prices.len() - window)
            .map(|i| bessel_std_dev(&returns[i..i + window]) * factor)
            .collect();

        Ok(vols)
    }

    /// Calculate the most recent annualized volatility, if a full window exists
    pub fn latest(&self, prices: &[f64], window: usize) -> Result<Option<f64>, VolatilityError> {
        let end = prices.len().min(window.saturating_add(1));
        Ok(self.compute(&prices[..end], window)?.first().copied())
    }
}

impl Default for VolatilityEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculate log returns of a newest-first price series
///
/// Entry `i` is `ln(prices[i] / prices[i + 1])`, taken as a difference of
/// logs so extreme ratios stay finite.
pub fn log_returns(prices: &[f64]) -> Result<Vec<f64>, VolatilityError> {
    if let Some((index, &price)) = prices
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.is_finite() && **p > 0.0))
    {
        return Err(VolatilityError::Domain { index, price });
    }

    Ok(prices.windows(2).map(|w| w[0].ln() - w[1].ln()).collect())
}

/// Sample standard deviation with Bessel's correction
///
/// Returns `None` for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(bessel_std_dev(values))
}

/// Two-pass sample standard deviation; callers guarantee `values.len() >= 2`
fn bessel_std_dev(values: &[f64]) -> f64 {
    debug_assert!(values.len() >= 2);
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);

    variance.sqrt()
}

/// Approximate standard error of a volatility estimated from `n` returns
///
/// SE ≈ vol / sqrt(2n)
pub fn standard_error(volatility: f64, n: usize) -> Option<f64> {
    if n < 2 {
        return None;
    }
    Some(volatility / (2.0 * n as f64).sqrt())
}
