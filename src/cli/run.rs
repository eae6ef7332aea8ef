//! Run command implementation

use crate::config::{Config, OutputFormat, SourceKind};
use crate::feed::{ChartApiConfig, ChartApiSource, CsvPriceSource, PriceSource};
use crate::pipeline::Pipeline;
use crate::render::{CsvSink, MultiSink, ParquetSink, RenderSink, TableSink};
use chrono::{NaiveDate, Utc};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Symbols to compute, overriding the configuration
    #[arg(long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Window lengths in days, overriding the configuration
    #[arg(long, value_delimiter = ',')]
    pub windows: Vec<usize>,

    /// Price source
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output directory for file formats
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Last date of history (defaults to today, UTC)
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

impl RunArgs {
    /// Merge command-line overrides into the loaded configuration
    pub fn apply(&self, mut config: Config) -> anyhow::Result<Config> {
        if !self.symbols.is_empty() {
            config.analysis.symbols = self.symbols.clone();
        }
        if !self.windows.is_empty() {
            config.analysis.windows = self.windows.clone();
        }
        if let Some(kind) = self.source {
            config.source.kind = kind;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(ref dir) = self.output {
            config.output.dir = dir.clone();
        }
        config.validate()?;
        Ok(config)
    }

    pub async fn execute(&self, config: Config) -> anyhow::Result<()> {
        let config = self.apply(config)?;
        let end = self.end.unwrap_or_else(|| Utc::now().date_naive());

        let pipeline = Pipeline::from_config(&config.analysis)?;
        let source = build_source(&config)?;
        let mut sink = build_sink(&config);

        tracing::info!(
            symbols = ?config.analysis.symbols,
            windows = ?config.analysis.windows,
            %end,
            "Computing realized volatility"
        );

        let summary = pipeline.run(source.as_ref(), sink.as_mut(), end).await?;

        if !summary.skipped_symbols.is_empty() {
            tracing::warn!(skipped = ?summary.skipped_symbols, "Some symbols were skipped");
        }

        Ok(())
    }
}

fn build_source(config: &Config) -> anyhow::Result<Box<dyn PriceSource>> {
    let source: Box<dyn PriceSource> = match config.source.kind {
        SourceKind::ChartApi => Box::new(ChartApiSource::with_config(ChartApiConfig {
            base_url: config.source.base_url.clone(),
            timeout: Duration::from_secs(config.source.timeout_secs),
        })?),
        SourceKind::Csv => Box::new(CsvPriceSource::new(config.source.csv_dir.clone())),
    };
    Ok(source)
}

/// File formats also print the summary table
fn build_sink(config: &Config) -> Box<dyn RenderSink + Send> {
    let dir = &config.output.dir;
    let file: Box<dyn RenderSink + Send> = match config.output.format {
        OutputFormat::Table => return Box::new(TableSink::stdout()),
        OutputFormat::Csv => Box::new(CsvSink::new(dir.join("volatility.csv"))),
        OutputFormat::Parquet => Box::new(ParquetSink::new(dir.join("volatility.parquet"))),
    };

    let mut sink = MultiSink::new();
    sink.push(file);
    sink.push(Box::new(TableSink::stdout()));
    Box::new(sink)
}
