//! CSV price source
//!
//! Reads `{dir}/{symbol}.csv` files in the chart export layout
//! (`Date,Open,High,Low,Close,Adj Close,Volume`). Only `Date` and `Close`
//! are required.

use super::{PriceRequest, PriceSource};
use crate::series::{PricePoint, PriceSeries};
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::io::Read;
use std::path::{Path, PathBuf};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Price source reading one CSV file per symbol
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    dir: PathBuf,
}

impl CsvPriceSource {
    /// Create a source rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding a symbol's prices
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", symbol))
    }

    /// Load every row of a CSV file, regardless of date
    pub fn load_file(symbol: &str, path: &Path) -> anyhow::Result<PriceSeries> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open price file {}", path.display()))?;
        read_closes(symbol, file, |_| true)
    }
}

#[async_trait]
impl PriceSource for CsvPriceSource {
    async fn fetch(&self, request: &PriceRequest) -> anyhow::Result<PriceSeries> {
        let path = self.path_for(&request.symbol);
        let symbol = request.symbol.clone();
        let request = request.clone();

        tracing::debug!(path = ?path, symbol = %symbol, "Reading price file");

        let series = tokio::task::spawn_blocking(move || {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("Failed to open price file {}", path.display()))?;
            read_closes(&symbol, file, |date| request.contains(date))
        })
        .await??;

        Ok(series)
    }
}

/// Parse `Date`/`Close` columns, skipping rows without a numeric close
fn read_closes<R: Read>(
    symbol: &str,
    reader: R,
    keep: impl Fn(NaiveDate) -> bool,
) -> anyhow::Result<PriceSeries> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers().context("Missing CSV header")?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", name))
    };
    let date_idx = column("Date")?;
    let close_idx = column("Close")?;

    let mut points = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV row {}", line + 2))?;

        let raw_date = record.get(date_idx).unwrap_or_default().trim();
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT)
            .with_context(|| format!("Invalid date '{}' on row {}", raw_date, line + 2))?;
        if !keep(date) {
            continue;
        }

        match record.get(close_idx).map(str::trim).map(str::parse::<f64>) {
            Some(Ok(close)) => points.push(PricePoint::new(date, close)),
            _ => tracing::debug!(symbol, %date, "Skipping row without a close"),
        }
    }

    Ok(PriceSeries::from_points(symbol, points)?)
}
