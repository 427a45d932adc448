//! Session loader: telemetry log plus optional metadata sidecar

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use contracts::{OverlayConfig, ParseReport, SessionMetadata, TelemetrySeries};
use tracing::{info, instrument, warn};

use crate::error::{IngestionError, Result};
use crate::metadata::parse_metadata;
use crate::parser::LogParser;

/// Everything read for one playback session
#[derive(Debug, Clone)]
pub struct LoadedSession {
    pub metadata: SessionMetadata,
    pub series: TelemetrySeries,
    pub report: ParseReport,
}

/// Reads and parses the session sources
///
/// The telemetry log is required. A missing metadata sidecar only logs a
/// warning and yields default metadata; other read failures abort the load.
#[derive(Debug, Clone)]
pub struct SessionLoader {
    parser: LogParser,
    telemetry: PathBuf,
    metadata: Option<PathBuf>,
}

impl SessionLoader {
    pub fn new(telemetry: impl Into<PathBuf>) -> Self {
        Self {
            parser: LogParser::default(),
            telemetry: telemetry.into(),
            metadata: None,
        }
    }

    /// Build from the `sources` and `parser` sections
    pub fn from_config(config: &OverlayConfig) -> Self {
        Self {
            parser: LogParser::new(config.parser.clone()),
            telemetry: config.sources.telemetry.clone(),
            metadata: config.sources.metadata.clone(),
        }
        .normalized()
    }

    pub fn with_metadata(mut self, path: impl Into<PathBuf>) -> Self {
        self.metadata = Some(path.into());
        self.normalized()
    }

    pub fn with_parser(mut self, parser: LogParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn telemetry_path(&self) -> &Path {
        &self.telemetry
    }

    pub fn metadata_path(&self) -> Option<&Path> {
        self.metadata.as_deref()
    }

    /// An empty metadata path disables the sidecar
    fn normalized(mut self) -> Self {
        if self
            .metadata
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            self.metadata = None;
        }
        self
    }

    /// Read both sources and parse them
    ///
    /// # Errors
    /// `Fetch` when the telemetry log (or an existing but unreadable
    /// sidecar) cannot be read, `Format` when the log cannot be parsed.
    #[instrument(
        name = "session_load",
        skip(self),
        fields(telemetry = %self.telemetry.display())
    )]
    pub async fn load(&self) -> Result<LoadedSession> {
        let telemetry_text = tokio::fs::read_to_string(&self.telemetry)
            .await
            .map_err(|e| IngestionError::fetch(self.telemetry.display().to_string(), e))?;

        let metadata_text = match &self.metadata {
            Some(path) => match tokio::fs::read_to_string(path).await {
                Ok(text) => Some(text),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!(path = %path.display(), "metadata sidecar not found, using defaults");
                    None
                }
                Err(e) => return Err(IngestionError::fetch(path.display().to_string(), e)),
            },
            None => None,
        };

        self.load_from_str(&telemetry_text, metadata_text.as_deref())
    }

    /// Parse already fetched text
    pub fn load_from_str(
        &self,
        telemetry_text: &str,
        metadata_text: Option<&str>,
    ) -> Result<LoadedSession> {
        let parsed = self.parser.parse(telemetry_text)?;
        let metadata = metadata_text.map(parse_metadata).unwrap_or_default();

        info!(
            dialect = %parsed.report.dialect,
            samples = parsed.series.len(),
            rows_skipped = parsed.report.rows_skipped,
            venue = %metadata.venue,
            "session loaded"
        );
        metrics::counter!(
            "telemetry_overlay_sessions_loaded_total",
            "dialect" => parsed.report.dialect.as_str()
        )
        .increment(1);

        Ok(LoadedSession {
            metadata,
            series: parsed.series,
            report: parsed.report,
        })
    }
}
