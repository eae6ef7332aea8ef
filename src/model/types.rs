//! Volatility estimator types

use thiserror::Error;

/// Volatility estimation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VolatilityError {
    /// Estimator was configured with an unusable parameter
    #[error("config error: {0}")]
    Config(String),
    /// A price cannot produce a log-return
    #[error("domain error: non-positive price {price} at index {index}")]
    Domain { index: usize, price: f64 },
}

impl VolatilityError {
    /// Whether the error comes from the input data rather than configuration
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }
}
