//! ExportDispatcher - runs each exporter in its own task

use std::path::PathBuf;
use std::sync::Arc;

use contracts::{ExportArtifact, ExportConfig, ExportFormat, SessionBundle, SessionExporter};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::error::ExportError;
use crate::exporters::{CsvExporter, JsonExporter, LogExporter};

/// Exporter that did not produce an artifact
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFailure {
    pub exporter: String,
    pub message: String,
}

/// Outcome of one export run
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub artifacts: Vec<ExportArtifact>,
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Files written, in completion order
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.artifacts.iter().filter_map(|a| a.path.as_ref())
    }
}

type ExportTask = JoinHandle<Result<ExportArtifact, contracts::ContractError>>;

/// Fans a session out to exporters
///
/// Every exporter runs as a separate task against a shared bundle; a failing
/// or panicking exporter is reported without affecting the others.
pub struct ExportDispatcher {
    bundle: Arc<SessionBundle>,
    tasks: Vec<(String, ExportTask)>,
}

impl ExportDispatcher {
    pub fn new(bundle: SessionBundle) -> Self {
        Self {
            bundle: Arc::new(bundle),
            tasks: Vec::new(),
        }
    }

    /// Start an exporter
    pub fn spawn<E: SessionExporter + Send + 'static>(&mut self, mut exporter: E) {
        let name = exporter.name().to_string();
        let bundle = Arc::clone(&self.bundle);
        let task = tokio::spawn(async move { exporter.export(&bundle).await });
        self.tasks.push((name, task));
    }

    /// Exporters started and not yet awaited
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for every exporter
    #[instrument(name = "export_dispatcher_finish", skip(self), fields(exporters = self.tasks.len()))]
    pub async fn finish(self) -> ExportReport {
        let mut report = ExportReport::default();

        for (name, task) in self.tasks {
            let outcome = match task.await {
                Ok(Ok(artifact)) => Ok(artifact),
                Ok(Err(e)) => Err(e.to_string()),
                Err(e) => Err(format!("exporter task failed: {e}")),
            };

            match outcome {
                Ok(artifact) => {
                    observability::record_export(&name, true);
                    report.artifacts.push(artifact);
                }
                Err(message) => {
                    observability::record_export(&name, false);
                    error!(exporter = %name, error = %message, "Export failed");
                    report.failures.push(ExportFailure {
                        exporter: name,
                        message,
                    });
                }
            }
        }

        info!(
            artifacts = report.artifacts.len(),
            failures = report.failures.len(),
            "Export finished"
        );
        report
    }
}

/// Build a dispatcher with one exporter per configured format
#[instrument(
    name = "export_dispatcher_create",
    skip(config, bundle),
    fields(formats = config.formats.len(), output_dir = %config.output_dir.display())
)]
pub fn create_dispatcher(
    config: &ExportConfig,
    bundle: SessionBundle,
) -> Result<ExportDispatcher, ExportError> {
    let mut dispatcher = ExportDispatcher::new(bundle);

    for format in &config.formats {
        let name = format.as_str();
        match format {
            ExportFormat::Csv => dispatcher.spawn(CsvExporter::new(name, &config.output_dir)?),
            ExportFormat::Json => dispatcher.spawn(JsonExporter::new(
                name,
                &config.output_dir,
                config.json_decimation,
            )?),
            ExportFormat::Log => dispatcher.spawn(LogExporter::new(name)),
        }
    }

    Ok(dispatcher)
}
