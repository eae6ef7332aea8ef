//! Volatility pipeline
//!
//! Fetches each symbol, computes one curve per window and hands the curves
//! to a rendering sink. Fetches run concurrently; each symbol's
//! computation is independent.

use crate::config::AnalysisConfig;
use crate::feed::{PriceRequest, PriceSource};
use crate::model::{VolatilityError, VolatilityEstimator};
use crate::render::RenderSink;
use crate::series::{PriceSeries, VolatilityCurve};
use crate::telemetry::{self, CounterMetric};
use chrono::NaiveDate;
use futures_util::future::join_all;
use std::time::Instant;

/// What a pipeline run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Curves handed to the sink
    pub curves_rendered: usize,
    /// Curves without a single full window
    pub empty_curves: usize,
    /// Symbols dropped after a fetch or data error
    pub skipped_symbols: Vec<String>,
}

/// Computes volatility curves for every (symbol, window) pair
#[derive(Debug, Clone)]
pub struct Pipeline {
    symbols: Vec<String>,
    windows: Vec<usize>,
    lookback_days: u32,
    estimator: VolatilityEstimator,
}

impl Pipeline {
    pub fn new(
        symbols: Vec<String>,
        windows: Vec<usize>,
        lookback_days: u32,
        estimator: VolatilityEstimator,
    ) -> Self {
        Self {
            symbols,
            windows,
            lookback_days,
            estimator,
        }
    }

    /// Build a pipeline from the analysis section of the configuration
    pub fn from_config(config: &AnalysisConfig) -> anyhow::Result<Self> {
        let estimator = VolatilityEstimator::with_periods_per_year(config.periods_per_year)?;
        Ok(Self::new(
            config.symbols.clone(),
            config.windows.clone(),
            config.lookback_days,
            estimator,
        ))
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn windows(&self) -> &[usize] {
        &self.windows
    }

    /// Fetch, compute and render, with history ending at `end`
    ///
    /// A symbol whose fetch fails or whose prices are invalid is logged and
    /// skipped. A configuration error aborts the run, as does a sink error.
    pub async fn run(
        &self,
        source: &dyn PriceSource,
        sink: &mut dyn RenderSink,
        end: NaiveDate,
    ) -> anyhow::Result<RunSummary> {
        let mut summary = RunSummary::default();

        let fetches = self.symbols.iter().map(|symbol| async move {
            let request = match PriceRequest::lookback(symbol.as_str(), end, self.lookback_days) {
                Ok(request) => request,
                Err(e) => return (symbol, Err(e)),
            };
            let started = Instant::now();
            let result = source.fetch(&request).await;
            telemetry::record_fetch_latency(symbol, started.elapsed());
            (symbol, result)
        });

        for (symbol, result) in join_all(fetches).await {
            let series = match result {
                Ok(series) => series,
                Err(e) => {
                    tracing::warn!(symbol = %symbol, error = %e, "Price fetch failed, skipping symbol");
                    telemetry::increment(CounterMetric::SymbolsSkipped);
                    summary.skipped_symbols.push(symbol.clone());
                    continue;
                }
            };

            match self.compute_curves(&series) {
                Ok(curves) => {
                    for curve in curves {
                        if curve.is_empty() {
                            tracing::info!(
                                symbol = %symbol,
                                window = curve.window,
                                points = series.len(),
                                "Not enough history for a full window"
                            );
                            telemetry::increment(CounterMetric::EmptyCurves);
                            summary.empty_curves += 1;
                            continue;
                        }

                        if let Some(latest) = curve.latest() {
                            telemetry::set_latest_volatility(symbol, curve.window, latest);
                        }
                        sink.draw(&curve)?;
                        telemetry::increment(CounterMetric::CurvesRendered);
                        summary.curves_rendered += 1;
                    }
                }
                Err(e @ VolatilityError::Domain { .. }) => {
                    tracing::warn!(symbol = %symbol, error = %e, "Invalid prices, skipping symbol");
                    telemetry::increment(CounterMetric::SymbolsSkipped);
                    summary.skipped_symbols.push(symbol.clone());
                }
                Err(e) => return Err(e.into()),
            }
        }

        sink.finish()?;

        tracing::info!(
            curves = summary.curves_rendered,
            empty = summary.empty_curves,
            skipped = summary.skipped_symbols.len(),
            "Pipeline finished"
        );

        Ok(summary)
    }

    /// One curve per configured window, all-or-nothing per symbol
    pub fn compute_curves(
        &self,
        series: &PriceSeries,
    ) -> Result<Vec<VolatilityCurve>, VolatilityError> {
        let closes = series.closes();
        self.windows
            .iter()
            .map(|&window| {
                let values = self.estimator.compute(&closes, window)?;
                Ok(VolatilityCurve::align(series, window, &values))
            })
            .collect()
    }
}
