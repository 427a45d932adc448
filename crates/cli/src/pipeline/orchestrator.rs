//! Batch pipeline: load -> summarise -> export.

use std::time::Instant;

use contracts::{OverlayConfig, SessionBundle};
use tracing::{info, warn};

use super::PipelineStats;
use crate::commands::load_session;
use crate::error::{CliError, Result};

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Effective overlay configuration (file + CLI overrides)
    pub overlay: OverlayConfig,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,

    /// Skip exporters
    pub dry_run: bool,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline to completion
    pub async fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let overlay = &self.config.overlay;

        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)
                .map_err(|e| CliError::invalid_argument("metrics-port", e.to_string()))?;
            info!("Metrics endpoint available on port {}", port);
        }

        info!(
            telemetry = %overlay.sources.telemetry.display(),
            metadata = ?overlay.sources.metadata,
            "Loading session..."
        );
        let session = load_session(overlay).await?;
        let session_stats = ingestion::compute_stats(&session.series);

        info!(
            samples = session_stats.num_samples,
            duration_s = session_stats.duration_s,
            dialect = %session.report.dialect,
            "Session summarised"
        );

        let mut stats = PipelineStats {
            title: session.metadata.title(),
            report: Some(session.report.clone()),
            session: session_stats,
            ..Default::default()
        };

        if self.config.dry_run {
            info!("Dry run mode - skipping export");
            stats.duration = start_time.elapsed();
            return Ok(stats);
        }

        if overlay.export.formats.is_empty() {
            warn!("No export formats configured - nothing will be written");
        }

        let bundle = SessionBundle {
            metadata: session.metadata,
            series: session.series,
            stats: session_stats,
        };

        let dispatcher = exporter::create_dispatcher(&overlay.export, bundle)
            .map_err(|e| CliError::export(e.to_string()))?;
        info!(exporters = dispatcher.pending(), "Exporters started");

        let report = dispatcher.finish().await;
        stats.duration = start_time.elapsed();

        if !report.is_success() {
            let message = report
                .failures
                .iter()
                .map(|f| format!("{}: {}", f.exporter, f.message))
                .collect::<Vec<_>>()
                .join("; ");
            stats.exports = Some(report);
            stats.print_summary();
            return Err(CliError::export(message));
        }

        stats.exports = Some(report);
        Ok(stats)
    }
}
