//! Ingestion error types

use thiserror::Error;

/// Ingestion error
///
/// Both variants abort the load. Malformed rows are not errors; they are
/// only counted in the `ParseReport`.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Source could not be read
    #[error("cannot read {source_name}: {source}")]
    Fetch {
        /// Path or label of the source
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// No timestamp column, or nothing to parse
    #[error("unrecognised telemetry format: {message}")]
    Format {
        /// What was wrong with the input
        message: String,
    },
}

impl IngestionError {
    /// Create a fetch error
    pub fn fetch(source_name: impl Into<String>, source: std::io::Error) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            source,
        }
    }

    /// Create a format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }
}

/// Ingestion Result alias
pub type Result<T> = std::result::Result<T, IngestionError>;
