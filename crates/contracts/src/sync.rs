//! Resolution - Sync Engine output
//!
//! Result of mapping one playback position onto the telemetry clock.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TelemetrySample;

/// Outcome of one nearest-sample lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Playback position (seconds, video clock)
    pub playback_time: f64,

    /// Offset in effect for this lookup
    pub offset: f64,

    /// `playback_time + offset` (seconds, telemetry clock)
    pub synced_time: f64,

    /// Matched sample; `None` when the series is empty or the match is stale
    pub sample: Option<TelemetrySample>,

    /// Distance to the nearest sample, even when it was rejected as stale
    pub nearest_distance: Option<f64>,
}

impl Resolution {
    /// Whether telemetry is available for this position
    #[inline]
    pub fn is_available(&self) -> bool {
        self.sample.is_some()
    }

    /// Lookup status
    pub fn status(&self) -> ResolutionStatus {
        match (self.sample, self.nearest_distance) {
            (Some(_), _) => ResolutionStatus::Hit,
            (None, Some(_)) => ResolutionStatus::Stale,
            (None, None) => ResolutionStatus::Empty,
        }
    }
}

/// Lookup status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// Sample within the staleness threshold
    Hit,
    /// Nearest sample too far away
    Stale,
    /// Nothing to look up
    Empty,
}

impl ResolutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStatus::Hit => "hit",
            ResolutionStatus::Stale => "stale",
            ResolutionStatus::Empty => "empty",
        }
    }
}

/// Snapshot of the sync relationship for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub video_time: f64,
    pub offset: f64,
    pub synced_time: f64,
    pub samples_loaded: usize,
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Video {:.2}s -> Telemetry {:.2}s (offset {:.3}s, {} samples loaded)",
            self.video_time, self.synced_time, self.offset, self.samples_loaded
        )
    }
}
