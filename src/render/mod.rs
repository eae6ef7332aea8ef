//! Rendering sink module
//!
//! Consumers of volatility curves: CSV and Parquet files, terminal tables

mod csv_sink;
mod parquet_sink;
mod table;

pub use csv_sink::CsvSink;
pub use parquet_sink::{curve_schema, ParquetSink};
pub use table::{CurveStats, TableSink};

use crate::series::VolatilityCurve;

/// Trait for rendering sink implementations
///
/// Sinks are owned by the caller; `finish` flushes whatever was drawn.
pub trait RenderSink {
    /// Add one (symbol, window) curve
    fn draw(&mut self, curve: &VolatilityCurve) -> anyhow::Result<()>;

    /// Flush all drawn curves to the output
    fn finish(&mut self) -> anyhow::Result<()>;
}

/// Sends every curve to several sinks
#[derive(Default)]
pub struct MultiSink {
    sinks: Vec<Box<dyn RenderSink + Send>>,
}

impl MultiSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sink: Box<dyn RenderSink + Send>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl RenderSink for MultiSink {
    fn draw(&mut self, curve: &VolatilityCurve) -> anyhow::Result<()> {
        for sink in &mut self.sinks {
            sink.draw(curve)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        for sink in &mut self.sinks {
            sink.finish()?;
        }
        Ok(())
    }
}
