//! Prometheus metrics

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Curves handed to the rendering sink
    CurvesRendered,
    /// Symbols skipped after a fetch or domain failure
    SymbolsSkipped,
    /// Curves with no full window
    EmptyCurves,
}

/// Install the Prometheus exporter on the given port
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus metrics exporter listening");
    Ok(())
}

/// Increment a counter
pub fn increment(metric: CounterMetric) {
    let metric_name = match metric {
        CounterMetric::CurvesRendered => "histvol_curves_rendered_total",
        CounterMetric::SymbolsSkipped => "histvol_symbols_skipped_total",
        CounterMetric::EmptyCurves => "histvol_empty_curves_total",
    };

    metrics::counter!(metric_name).increment(1);
}

/// Record how long a price fetch took
pub fn record_fetch_latency(symbol: &str, duration: Duration) {
    metrics::histogram!("histvol_fetch_latency_ms", "symbol" => symbol.to_string())
        .record(duration.as_secs_f64() * 1000.0);

    tracing::debug!(
        symbol,
        value_ms = duration.as_millis() as u64,
        "Recording fetch latency"
    );
}

/// Publish the most recent volatility of a curve
pub fn set_latest_volatility(symbol: &str, window: usize, value: f64) {
    metrics::gauge!(
        "histvol_latest_volatility",
        "symbol" => symbol.to_string(),
        "window" => window.to_string()
    )
    .set(value);
}
