//! Compute command implementation

use crate::config::Config;
use crate::feed::CsvPriceSource;
use crate::model::VolatilityEstimator;
use crate::render::{RenderSink, TableSink};
use crate::series::VolatilityCurve;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// CSV file with `Date` and `Close` columns
    #[arg(short, long)]
    pub input: PathBuf,

    /// Window length in days
    #[arg(short, long)]
    pub window: usize,

    /// Symbol label (defaults to the file stem)
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Print every (date, volatility) point
    #[arg(long)]
    pub points: bool,
}

impl ComputeArgs {
    /// Label used for the curve
    pub fn symbol_name(&self) -> String {
        self.symbol.clone().unwrap_or_else(|| {
            self.input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "prices".to_string())
        })
    }

    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let symbol = self.symbol_name();
        let series = CsvPriceSource::load_file(&symbol, &self.input)?;
        let estimator = VolatilityEstimator::with_periods_per_year(config.analysis.periods_per_year)?;

        let values = estimator.compute(&series.closes(), self.window)?;
        let curve = VolatilityCurve::align(&series, self.window, &values);

        tracing::info!(
            symbol = %symbol,
            window = self.window,
            prices = series.len(),
            values = curve.points.len(),
            "Computed volatility"
        );

        if self.points {
            for (date, value) in &curve.points {
                println!("{}\t{:.6}", date, value);
            }
        }

        let mut table = TableSink::stdout();
        table.draw(&curve)?;
        table.finish()?;

        Ok(())
    }
}
