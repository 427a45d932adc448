//! SessionStats - summary of a loaded series

use serde::{Deserialize, Serialize};

/// Session summary statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub num_samples: usize,

    /// Latest timestamp (seconds)
    pub duration_s: f64,

    /// Earliest and latest timestamp
    pub time_range: Option<(f64, f64)>,

    /// Largest distance value (metres)
    pub total_distance_m: f64,

    pub max_speed_mph: f64,
    pub avg_speed_mph: f64,
    pub max_speed_kph: f64,
    pub avg_speed_kph: f64,

    pub max_rpm: f64,
    pub avg_rpm: f64,
}
