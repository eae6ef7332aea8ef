use clap::Parser;
use hist_vol::cli::{Cli, Commands};
use hist_vol::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            Config::bundled()?
        }
    };

    // Initialize telemetry
    hist_vol::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting volatility run");
            args.execute(config).await?;
        }
        Commands::Compute(args) => {
            args.execute(&config)?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Symbols: {}", config.analysis.symbols.join(", "));
            println!(
                "  Windows: {}",
                config
                    .analysis
                    .windows
                    .iter()
                    .map(|w| format!("{}d", w))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!("  Periods/year: {}", config.analysis.periods_per_year);
            println!("  Lookback: {} days", config.analysis.lookback_days);
            println!("  Source: {:?}", config.source.kind);
            println!(
                "  Output: {:?} -> {}",
                config.output.format,
                config.output.dir.display()
            );
        }
    }

    Ok(())
}
