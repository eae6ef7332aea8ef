//! Price source module
//!
//! Daily closing prices from a chart API or local CSV exports

mod chart_api;
mod csv_file;
mod types;

pub use chart_api::{ChartApiConfig, ChartApiSource, CHART_API_URL};
pub use csv_file::CsvPriceSource;
pub use types::PriceRequest;

use crate::series::PriceSeries;
use async_trait::async_trait;

/// Trait for price source implementations
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch daily closes for the request, newest-first
    async fn fetch(&self, request: &PriceRequest) -> anyhow::Result<PriceSeries>;
}
