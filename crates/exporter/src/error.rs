//! Exporter error types

use thiserror::Error;

/// Exporter-specific errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Exporter could not be set up
    #[error("failed to create exporter '{name}': {message}")]
    ExporterCreation { name: String, message: String },

    /// Export failure reported by an exporter
    #[error("export error: {0}")]
    Contract(#[from] contracts::ContractError),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Create an exporter creation error
    pub fn exporter_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExporterCreation {
            name: name.into(),
            message: message.into(),
        }
    }
}
