//! Price and volatility series types
//!
//! Series are held newest-first: index 0 is the most recent date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Series construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    /// Two points share a date
    #[error("Duplicate date in price series: {0}")]
    DuplicateDate(NaiveDate),
}

/// A single closing price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Closing prices for one symbol, newest-first with unique dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceSeries")]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

/// Deserialized form, checked through `PriceSeries::from_points`
#[derive(Deserialize)]
struct RawPriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl TryFrom<RawPriceSeries> for PriceSeries {
    type Error = SeriesError;

    fn try_from(raw: RawPriceSeries) -> Result<Self, Self::Error> {
        Self::from_points(raw.symbol, raw.points)
    }
}

impl PriceSeries {
    /// Build a series from points in any order
    ///
    /// Points are sorted newest-first. Prices are not checked here; the
    /// estimator rejects non-positive values.
    pub fn from_points(
        symbol: impl Into<String>,
        mut points: Vec<PricePoint>,
    ) -> Result<Self, SeriesError> {
        points.sort_by(|a, b| b.date.cmp(&a.date));

        if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(SeriesError::DuplicateDate(pair[0].date));
        }

        Ok(Self {
            symbol: symbol.into(),
            points,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closing prices, newest-first
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Dates, newest-first
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Most recent point
    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.first()
    }
}

/// One rendered volatility line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityCurve {
    /// Source symbol (e.g. "BTC-USD")
    pub symbol: String,
    /// Window length in days
    pub window: usize,
    /// (date, annualized volatility), newest-first
    pub points: Vec<(NaiveDate, f64)>,
}

impl VolatilityCurve {
    /// Pair estimator output with the leading dates of its source series
    pub fn align(series: &PriceSeries, window: usize, values: &[f64]) -> Self {
        let points = series
            .points()
            .iter()
            .zip(values)
            .map(|(p, v)| (p.date, *v))
            .collect();

        Self {
            symbol: series.symbol().to_string(),
            window,
            points,
        }
    }

    /// Legend label
    pub fn label(&self) -> String {
        format!("{} {} Days", self.symbol, self.window)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent value
    pub fn latest(&self) -> Option<f64> {
        self.points.first().map(|(_, v)| *v)
    }
}
