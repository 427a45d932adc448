//! SessionExporter trait - Exporter output interface
//!
//! Defines the abstract interface for exporters.

use std::path::PathBuf;

use crate::{ContractError, SessionMetadata, SessionStats, TelemetrySeries};

/// Everything an exporter needs about a processed session
#[derive(Debug, Clone)]
pub struct SessionBundle {
    pub metadata: SessionMetadata,
    pub series: TelemetrySeries,
    pub stats: SessionStats,
}

/// What an exporter produced
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    /// Exporter name
    pub exporter: String,

    /// Written file, `None` for exporters without file output
    pub path: Option<PathBuf>,

    /// Number of records written
    pub records: usize,
}

/// Session output trait
///
/// All exporter implementations must implement this trait.
#[trait_variant::make(SessionExporter: Send)]
pub trait LocalSessionExporter {
    /// Exporter name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Export a processed session
    ///
    /// # Errors
    /// Returns write error (should include context)
    async fn export(&mut self, bundle: &SessionBundle) -> Result<ExportArtifact, ContractError>;
}
