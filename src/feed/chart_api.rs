//! Chart API client for daily closing prices
//!
//! Speaks the Yahoo Finance `v8/finance/chart` format. Days with a `null`
//! close are dropped; no values are imputed.

use super::{PriceRequest, PriceSource};
use crate::series::{PricePoint, PriceSeries};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Chart API base URL
pub const CHART_API_URL: &str = "https://query1.finance.yahoo.com";

/// Configuration for the chart API client
#[derive(Debug, Clone)]
pub struct ChartApiConfig {
    /// Base URL for the chart API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ChartApiConfig {
    fn default() -> Self {
        Self {
            base_url: CHART_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP price source backed by the chart API
pub struct ChartApiSource {
    config: ChartApiConfig,
    client: Client,
}

impl ChartApiSource {
    /// Create a client with custom configuration
    pub fn with_config(config: ChartApiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("hist-vol/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    /// Build the chart endpoint URL for a symbol
    fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}",
            self.config.base_url.trim_end_matches('/'),
            symbol
        )
    }
}

#[async_trait]
impl PriceSource for ChartApiSource {
    async fn fetch(&self, request: &PriceRequest) -> anyhow::Result<PriceSeries> {
        let url = self.chart_url(&request.symbol);
        let (period1, period2) = period_bounds(request);

        tracing::debug!(url = %url, symbol = %request.symbol, "Fetching daily closes");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("Chart API request failed for {}", request.symbol))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Chart API error: {} - {}", status, body);
        }

        let body = response.text().await?;
        let series = parse_chart_response(request, &body)?;

        tracing::info!(
            symbol = %request.symbol,
            points = series.len(),
            "Fetched daily closes"
        );

        Ok(series)
    }
}

/// Unix second bounds covering the request's whole end day
fn period_bounds(request: &PriceRequest) -> (i64, i64) {
    let start = request.start.and_time(chrono::NaiveTime::MIN).and_utc();
    let end = request
        .end
        .succ_opt()
        .unwrap_or(request.end)
        .and_time(chrono::NaiveTime::MIN)
        .and_utc();
    (start.timestamp(), end.timestamp())
}

/// Parse a chart API response body into a newest-first series
pub(crate) fn parse_chart_response(
    request: &PriceRequest,
    body: &str,
) -> anyhow::Result<PriceSeries> {
    let envelope: ChartEnvelope =
        serde_json::from_str(body).context("Invalid chart API response")?;

    if let Some(err) = envelope.chart.error {
        anyhow::bail!(
            "Chart API error for {}: {} - {}",
            request.symbol,
            err.code,
            err.description
        );
    }

    let result = envelope
        .chart
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("No chart data for {}", request.symbol))?;

    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close)
        .unwrap_or_default();

    if timestamps.len() != closes.len() {
        anyhow::bail!(
            "Chart API returned {} timestamps but {} closes",
            timestamps.len(),
            closes.len()
        );
    }

    let mut points = Vec::with_capacity(timestamps.len());
    let mut dropped = 0usize;
    for (ts, close) in timestamps.into_iter().zip(closes) {
        let Some(close) = close else {
            dropped += 1;
            continue;
        };
        let date = timestamp_date(ts)?;
        if request.contains(date) {
            points.push(PricePoint::new(date, close));
        }
    }

    if dropped > 0 {
        tracing::debug!(symbol = %request.symbol, dropped, "Dropped days without a close");
    }

    Ok(PriceSeries::from_points(request.symbol.clone(), points)?)
}

fn timestamp_date(ts: i64) -> anyhow::Result<NaiveDate> {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| anyhow::anyhow!("Invalid timestamp: {}", ts))
}

/// Top-level chart response
#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

/// One symbol's chart data
#[derive(Debug, Deserialize)]
struct ChartResult {
    /// Bar open times (unix seconds)
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}
