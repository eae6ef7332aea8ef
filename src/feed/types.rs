//! Price source types

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Daily closes requested for one symbol over an inclusive date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRequest {
    /// Ticker symbol (e.g., "BTC-USD")
    pub symbol: String,
    /// First date included
    pub start: NaiveDate,
    /// Last date included
    pub end: NaiveDate,
}

impl PriceRequest {
    pub fn new(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
        }
    }

    /// Request the `days` calendar days ending at `end`
    ///
    /// Fails when the start date falls outside the representable calendar.
    pub fn lookback(
        symbol: impl Into<String>,
        end: NaiveDate,
        days: u32,
    ) -> anyhow::Result<Self> {
        let start = end
            .checked_sub_signed(Duration::days(i64::from(days)))
            .ok_or_else(|| anyhow::anyhow!("{days} days before {end} is out of range"))?;
        Ok(Self::new(symbol, start, end))
    }

    /// Whether a date falls inside the requested range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
