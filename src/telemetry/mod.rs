//! Telemetry module
//!
//! Logging and metrics

mod logging;
mod metrics;

pub use self::metrics::{
    increment, init_metrics, record_fetch_latency, set_latest_volatility, CounterMetric,
};
pub use logging::{init_logging, LogFormat};

use crate::config::TelemetryConfig;

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)?;

    if let Some(port) = config.metrics_port {
        init_metrics(port)?;
    }

    Ok(())
}
