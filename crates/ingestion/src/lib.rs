//! # Ingestion
//!
//! Telemetry log and metadata ingestion.
//!
//! Responsibilities:
//! - Probe the log dialect (generic or vendor)
//! - Resolve columns through alias lists and read rows leniently
//! - Produce a sorted `TelemetrySeries` plus a `ParseReport`
//! - Parse the quoted key/value metadata sidecar
//! - Summarise a series into `SessionStats`
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::SessionLoader;
//!
//! let session = SessionLoader::new("data/raw/teledata.csv")
//!     .with_metadata("data/raw/teledata_metadata.csv")
//!     .load()
//!     .await?;
//! println!("{} samples from {}", session.series.len(), session.metadata.venue);
//! ```

mod column;
mod error;
mod generic;
mod loader;
mod metadata;
mod parser;
mod probe;
mod stats;
mod vendor;

// Re-exports
pub use column::{parse_leading_f64, parse_leading_int, resolve_column};
pub use contracts::{LogDialect, ParseReport, SessionMetadata, TelemetrySample, TelemetrySeries};
pub use error::{IngestionError, Result};
pub use loader::{LoadedSession, SessionLoader};
pub use metadata::parse_metadata;
pub use parser::{parse, LogParser, ParsedLog};
pub use probe::{probe, DialectProbe, VENDOR_FALLBACK_HEADER};
pub use stats::compute_stats;
pub use vendor::MIN_VENDOR_FIELDS;
