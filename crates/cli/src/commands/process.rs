//! `process` command implementation.

use anyhow::{Context, Result};
use contracts::ExportFormat;
use tracing::{info, warn};

use crate::cli::ProcessArgs;
use crate::commands::{load_config, shutdown_signal};
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `process` command
pub async fn run_process(args: &ProcessArgs) -> Result<()> {
    let mut overlay = load_config(&args.source)?;

    // Apply CLI overrides
    if let Some(ref output_dir) = args.output_dir {
        info!(output_dir = %output_dir.display(), "Overriding output directory from CLI");
        overlay.export.output_dir = output_dir.clone();
    }
    if !args.formats.is_empty() {
        overlay.export.formats = args.formats.iter().copied().map(ExportFormat::from).collect();
    }
    if let Some(decimation) = args.json_decimation {
        overlay.export.json_decimation = decimation;
    }
    config_loader::ConfigLoader::validate(&overlay).context("Invalid export overrides")?;

    info!(
        telemetry = %overlay.sources.telemetry.display(),
        output_dir = %overlay.export.output_dir.display(),
        formats = ?overlay.export.formats,
        dry_run = args.dry_run,
        "Configuration loaded"
    );

    let pipeline = Pipeline::new(PipelineConfig {
        overlay,
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
        dry_run: args.dry_run,
    });

    tokio::select! {
        result = pipeline.run() => {
            let stats = result?;
            info!(
                samples = stats.session.num_samples,
                duration_secs = stats.duration.as_secs_f64(),
                "Processing completed successfully"
            );
            stats.print_summary();
        }
        _ = shutdown_signal() => {
            warn!("Received shutdown signal, stopping...");
        }
    }

    Ok(())
}
