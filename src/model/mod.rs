//! Volatility model module
//!
//! Realized volatility estimation from closing prices

mod streaming;
mod types;
mod volatility;

pub use streaming::StreamingVolatility;
pub use types::VolatilityError;
pub use volatility::{
    log_returns, sample_std_dev, standard_error, VolatilityEstimator, CALENDAR_DAYS_PER_YEAR,
    TRADING_DAYS_PER_YEAR,
};
