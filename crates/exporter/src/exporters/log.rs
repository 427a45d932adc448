//! LogExporter - logs a session summary via tracing

use contracts::{ContractError, ExportArtifact, SessionBundle, SessionExporter};
use tracing::{info, instrument};

/// Exporter that only logs; useful for dry runs
pub struct LogExporter {
    name: String,
}

impl LogExporter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn log_summary(&self, bundle: &SessionBundle) {
        let stats = &bundle.stats;
        info!(
            exporter = %self.name,
            session = %bundle.metadata.title(),
            samples = stats.num_samples,
            duration_s = stats.duration_s,
            distance_m = stats.total_distance_m,
            max_speed_mph = stats.max_speed_mph,
            max_rpm = stats.max_rpm,
            "Session summary"
        );
    }
}

impl SessionExporter for LogExporter {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "log_exporter_export", skip(self, bundle), fields(exporter = %self.name))]
    async fn export(&mut self, bundle: &SessionBundle) -> Result<ExportArtifact, ContractError> {
        self.log_summary(bundle);
        Ok(ExportArtifact {
            exporter: self.name.clone(),
            path: None,
            records: bundle.series.len(),
        })
    }
}
