//! CsvExporter - full-resolution processed telemetry

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use contracts::{
    ContractError, ExportArtifact, SessionBundle, SessionExporter, TelemetrySample,
};
use tracing::{info, instrument};

use crate::error::ExportError;
use crate::exporters::ensure_dir;

pub const CSV_FILE_NAME: &str = "telemetry_processed.csv";

/// Column names; the generic log dialect reads this file back
pub const CSV_HEADER: &str = "timestamp,distance,speed_mph,speed_kph,rpm,gear,throttle,brake";

/// Writes every sample as one CSV row
pub struct CsvExporter {
    name: String,
    path: PathBuf,
}

impl CsvExporter {
    /// Create the exporter; the output directory is created up front
    pub fn new(name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let name = name.into();
        let output_dir = output_dir.into();
        ensure_dir(&name, &output_dir)?;

        Ok(Self {
            path: output_dir.join(CSV_FILE_NAME),
            name,
        })
    }

    fn write_row(out: &mut impl Write, s: &TelemetrySample) -> std::io::Result<()> {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            s.timestamp,
            s.distance,
            s.speed,
            s.speed_kph(),
            s.rpm,
            s.gear,
            s.throttle,
            s.brake
        )
    }

    fn write_file(&self, bundle: &SessionBundle) -> std::io::Result<usize> {
        let mut out = BufWriter::new(File::create(&self.path)?);
        writeln!(out, "{CSV_HEADER}")?;
        for sample in bundle.series.iter() {
            Self::write_row(&mut out, sample)?;
        }
        out.flush()?;
        Ok(bundle.series.len())
    }
}

impl SessionExporter for CsvExporter {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "csv_exporter_export",
        skip(self, bundle),
        fields(exporter = %self.name, samples = bundle.series.len())
    )]
    async fn export(&mut self, bundle: &SessionBundle) -> Result<ExportArtifact, ContractError> {
        let records = self
            .write_file(bundle)
            .map_err(|e| ContractError::export(&self.name, format!("{}: {e}", self.path.display())))?;

        info!(path = %self.path.display(), records, "CSV exported");
        Ok(ExportArtifact {
            exporter: self.name.clone(),
            path: Some(self.path.clone()),
            records,
        })
    }
}
