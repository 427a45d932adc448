//! Sync engine configuration contracts that can be shared across crates.

use serde::{Deserialize, Serialize};

/// Offset applied at session start (seconds)
pub const DEFAULT_INITIAL_OFFSET_S: f64 = -1.090;

/// Maximum distance between synced time and a sample before it is stale (seconds)
pub const DEFAULT_STALENESS_THRESHOLD_S: f64 = 1.0;

/// Sync engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncEngineConfig {
    /// Offset at session start
    #[serde(default = "default_initial_offset")]
    pub initial_offset_s: f64,

    /// Staleness cutoff for nearest-sample lookup
    #[serde(default = "default_staleness_threshold")]
    pub staleness_threshold_s: f64,

    /// Slider lower bound (presentation only)
    #[serde(default = "default_slider_min")]
    pub slider_min_s: f64,

    /// Slider upper bound (presentation only)
    #[serde(default = "default_slider_max")]
    pub slider_max_s: f64,

    /// Coarse nudge step
    #[serde(default = "default_coarse_step")]
    pub coarse_step_s: f64,

    /// Fine nudge step
    #[serde(default = "default_fine_step")]
    pub fine_step_s: f64,

    /// Lookup strategy
    #[serde(default)]
    pub lookup: LookupStrategy,
}

fn default_initial_offset() -> f64 {
    DEFAULT_INITIAL_OFFSET_S
}

fn default_staleness_threshold() -> f64 {
    DEFAULT_STALENESS_THRESHOLD_S
}

fn default_slider_min() -> f64 {
    -10.0
}

fn default_slider_max() -> f64 {
    10.0
}

fn default_coarse_step() -> f64 {
    1.0
}

fn default_fine_step() -> f64 {
    0.1
}

impl Default for SyncEngineConfig {
    fn default() -> Self {
        Self {
            initial_offset_s: default_initial_offset(),
            staleness_threshold_s: default_staleness_threshold(),
            slider_min_s: default_slider_min(),
            slider_max_s: default_slider_max(),
            coarse_step_s: default_coarse_step(),
            fine_step_s: default_fine_step(),
            lookup: LookupStrategy::default(),
        }
    }
}

impl SyncEngineConfig {
    /// Clamp an offset to the slider range
    ///
    /// Only for display; the engine accepts any finite offset.
    pub fn clamp_to_slider(&self, offset: f64) -> f64 {
        offset.clamp(self.slider_min_s, self.slider_max_s)
    }

    /// Nudge size of a step button
    pub fn step(&self, coarse: bool) -> f64 {
        if coarse {
            self.coarse_step_s
        } else {
            self.fine_step_s
        }
    }
}

/// Nearest-sample lookup strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStrategy {
    /// Full scan per query
    Linear,
    /// Cached cursor with binary-search reseek
    #[default]
    Cursor,
}
