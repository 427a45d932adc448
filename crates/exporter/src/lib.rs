//! # Exporter
//!
//! Writes a processed session to its output formats.
//!
//! Responsibilities:
//! - CSV (full resolution) and JSON (decimated, rounded) files
//! - Log summary for dry runs
//! - Run exporters as isolated tasks and collect an `ExportReport`

pub mod dispatcher;
pub mod error;
pub mod exporters;

pub use contracts::{ExportArtifact, SessionBundle, SessionExporter};
pub use dispatcher::{create_dispatcher, ExportDispatcher, ExportFailure, ExportReport};
pub use error::ExportError;
pub use exporters::{CsvExporter, JsonExporter, LogExporter, CSV_HEADER};
