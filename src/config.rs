//! Configuration types for hist-vol

use crate::model::CALENDAR_DAYS_PER_YEAR;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Longest history a run may request (one century)
pub const MAX_LOOKBACK_DAYS: u32 = 36_500;

/// Bundled default configuration
pub const DEFAULT_CONFIG: &str = include_str!("../config.toml.example");

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Which symbols and windows to compute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Ticker symbols (e.g., "BTC-USD")
    pub symbols: Vec<String>,
    /// Rolling window lengths in days
    pub windows: Vec<usize>,
    /// Return periods per year for annualization
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
    /// Calendar days of history to request
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

fn default_periods_per_year() -> u32 {
    CALENDAR_DAYS_PER_YEAR
}
fn default_lookback_days() -> u32 {
    365 * 2
}

/// Price source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    /// Chart API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// HTTP request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Directory of `{symbol}.csv` files for the csv source
    #[serde(default = "default_csv_dir")]
    pub csv_dir: PathBuf,
}

/// Price source kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    ChartApi,
    Csv,
}

fn default_base_url() -> String {
    crate::feed::CHART_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_csv_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::ChartApi,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            csv_dir: default_csv_dir(),
        }
    }
}

/// Rendering output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Directory for file outputs
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

/// Output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Summary table on stdout
    #[default]
    Table,
    /// Long-format CSV file
    Csv,
    /// Parquet file
    Parquet,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            dir: default_output_dir(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; disabled when unset
    pub metrics_port: Option<u16>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Bundled default configuration
    pub fn bundled() -> anyhow::Result<Self> {
        Self::parse(DEFAULT_CONFIG)
    }

    /// Reject configurations no run could succeed with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.analysis.symbols.is_empty() {
            anyhow::bail!("analysis.symbols must not be empty");
        }
        if self.analysis.windows.is_empty() {
            anyhow::bail!("analysis.windows must not be empty");
        }
        if let Some(w) = self.analysis.windows.iter().find(|w| **w < 2) {
            anyhow::bail!("analysis.windows entries must be at least 2, got {}", w);
        }
        if self.analysis.periods_per_year == 0 {
            anyhow::bail!("analysis.periods_per_year must be positive");
        }
        if self.analysis.lookback_days == 0 || self.analysis.lookback_days > MAX_LOOKBACK_DAYS {
            anyhow::bail!(
                "analysis.lookback_days must be between 1 and {}, got {}",
                MAX_LOOKBACK_DAYS,
                self.analysis.lookback_days
            );
        }
        Ok(())
    }
}
