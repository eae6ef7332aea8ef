//! CLI interface for hist-vol
//!
//! Provides subcommands for:
//! - `run`: Compute curves for every configured symbol and window
//! - `compute`: Compute one curve from a local CSV file
//! - `config`: Show the effective configuration

mod compute;
mod run;

pub use compute::ComputeArgs;
pub use run::RunArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "hist-vol")]
#[command(about = "Rolling historical volatility for crypto price series")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute curves for every configured symbol and window
    Run(RunArgs),
    /// Compute one curve from a local CSV file
    Compute(ComputeArgs),
    /// Show the effective configuration
    Config,
}
