//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Telemetry clock: seconds (f64) as recorded in the log
//! - Playback clock: seconds (f64) reported by the external video transport
//! - `telemetry_time = playback_time + offset_seconds`

mod config;
mod dialect;
mod error;
mod exporter;
mod metadata;
mod sample;
mod stats;
mod sync;
mod sync_engine_config;

pub use config::*;
pub use dialect::*;
pub use error::*;
pub use exporter::*;
pub use metadata::*;
pub use sample::*;
pub use stats::*;
pub use sync::*;
pub use sync_engine_config::*;
