//! JsonExporter - decimated telemetry for the web overlay

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use contracts::{
    ContractError, ExportArtifact, SessionBundle, SessionExporter, SessionMetadata, SessionStats,
    TelemetrySample,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::ExportError;
use crate::exporters::{ensure_dir, round_to};

pub const JSON_FILE_NAME: &str = "telemetry.json";

#[derive(Debug, Serialize)]
struct JsonDocument<'a> {
    metadata: &'a SessionMetadata,
    stats: &'a SessionStats,
    generated_at: String,
    sample_every: usize,
    telemetry: Vec<JsonFrame>,
}

/// One overlay frame, rounded for size
#[derive(Debug, Serialize)]
struct JsonFrame {
    time: f64,
    distance: f64,
    speed_mph: f64,
    speed_kph: f64,
    rpm: f64,
    throttle: f64,
    brake: f64,
    gear: i32,
}

impl From<&TelemetrySample> for JsonFrame {
    fn from(s: &TelemetrySample) -> Self {
        Self {
            time: round_to(s.timestamp, 3),
            distance: round_to(s.distance, 1),
            speed_mph: round_to(s.speed, 1),
            speed_kph: round_to(s.speed_kph(), 1),
            rpm: round_to(s.rpm, 0),
            throttle: round_to(s.throttle, 1),
            brake: round_to(s.brake, 1),
            gear: s.gear,
        }
    }
}

/// Writes metadata, stats and every Nth sample
pub struct JsonExporter {
    name: String,
    path: PathBuf,
    sample_every: usize,
}

impl JsonExporter {
    /// `sample_every` below 1 is treated as 1
    pub fn new(
        name: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        sample_every: usize,
    ) -> Result<Self, ExportError> {
        let name = name.into();
        let output_dir = output_dir.into();
        ensure_dir(&name, &output_dir)?;

        Ok(Self {
            path: output_dir.join(JSON_FILE_NAME),
            name,
            sample_every: sample_every.max(1),
        })
    }

    fn document<'a>(&self, bundle: &'a SessionBundle) -> JsonDocument<'a> {
        JsonDocument {
            metadata: &bundle.metadata,
            stats: &bundle.stats,
            generated_at: chrono::Utc::now().to_rfc3339(),
            sample_every: self.sample_every,
            telemetry: bundle
                .series
                .iter()
                .step_by(self.sample_every)
                .map(JsonFrame::from)
                .collect(),
        }
    }

    fn write_file(&self, document: &JsonDocument<'_>) -> std::io::Result<()> {
        let mut out = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut out, document)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        out.flush()
    }
}

impl SessionExporter for JsonExporter {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "json_exporter_export",
        skip(self, bundle),
        fields(exporter = %self.name, sample_every = self.sample_every)
    )]
    async fn export(&mut self, bundle: &SessionBundle) -> Result<ExportArtifact, ContractError> {
        let document = self.document(bundle);
        let records = document.telemetry.len();

        self.write_file(&document)
            .map_err(|e| ContractError::export(&self.name, format!("{}: {e}", self.path.display())))?;

        info!(path = %self.path.display(), records, "JSON exported");
        Ok(ExportArtifact {
            exporter: self.name.clone(),
            path: Some(self.path.clone()),
            records,
        })
    }
}
