//! # Sync Engine
//!
//! Aligns the playback clock with the telemetry clock.
//!
//! Responsibilities:
//! - Hold the offset and its four transitions (set-absolute, set-direct,
//!   nudge, reset)
//! - Convert playback time to telemetry time
//! - Resolve the nearest sample with a staleness cutoff
//!
//! ## Usage Example
//!
//! ```ignore
//! use sync_engine::{SyncCommand, SyncEngine, SyncEngineConfig};
//!
//! let mut engine = SyncEngine::new(series, SyncEngineConfig::default());
//!
//! engine.apply(SyncCommand::SetAbsolute { video: 12.0, telemetry: 10.91 });
//!
//! // On every playback tick
//! if let Some(sample) = engine.resolve(player.current_time()).sample {
//!     gauges.update(&sample);
//! }
//! ```

mod command;
mod cursor;
mod engine;
mod error;
mod offset;
mod resolver;

// Re-exports
pub use command::SyncCommand;
pub use cursor::SeriesCursor;
pub use engine::SyncEngine;
pub use error::CommandParseError;
pub use offset::SyncOffset;
pub use resolver::{nearest_linear, resolve, resolve_with_threshold};

// Re-export contracts types
pub use contracts::{
    LookupStrategy, Resolution, ResolutionStatus, SyncEngineConfig, SyncStatus, TelemetrySample,
    TelemetrySeries,
};
