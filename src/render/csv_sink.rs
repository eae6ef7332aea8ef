//! Long-format CSV output

use super::RenderSink;
use crate::series::VolatilityCurve;
use anyhow::Context;
use std::path::PathBuf;

/// Writes every curve to one `symbol,window,date,volatility` CSV file
pub struct CsvSink {
    path: PathBuf,
    curves: Vec<VolatilityCurve>,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            curves: Vec::new(),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl RenderSink for CsvSink {
    fn draw(&mut self, curve: &VolatilityCurve) -> anyhow::Result<()> {
        self.curves.push(curve.clone());
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;
        writer.write_record(["symbol", "window", "date", "volatility"])?;

        let mut rows = 0usize;
        for curve in &self.curves {
            let window = curve.window.to_string();
            for (date, value) in &curve.points {
                let date = date.format("%Y-%m-%d").to_string();
                let value = value.to_string();
                writer.write_record([
                    curve.symbol.as_str(),
                    window.as_str(),
                    date.as_str(),
                    value.as_str(),
                ])?;
                rows += 1;
            }
        }
        writer.flush()?;

        tracing::info!(path = ?self.path, rows, "Wrote volatility curves to CSV");

        Ok(())
    }
}
