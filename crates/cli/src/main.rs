//! # Telemetry Overlay CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Session loading, summaries and export
//! - One-shot and simulated-playback telemetry lookup
//! - Graceful shutdown handling

mod cli;
mod commands;
mod error;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use observability::ObservabilityConfig;

use cli::{Cli, Commands};
use commands::{run_info, run_play, run_process, run_resolve, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry Overlay CLI starting"
    );

    let result = match &cli.command {
        Commands::Process(args) => run_process(args).await,
        Commands::Validate(args) => run_validate(args).await,
        Commands::Info(args) => run_info(args).await,
        Commands::Resolve(args) => run_resolve(args).await,
        Commands::Play(args) => run_play(args).await,
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    observability::init_with_config(ObservabilityConfig::from_verbosity(
        cli.verbose,
        cli.quiet,
        cli.log_format.into(),
    ))
}
