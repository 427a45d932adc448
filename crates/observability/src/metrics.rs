//! Telemetry overlay metrics
//!
//! Recorders for the `metrics` facade plus in-memory aggregation for
//! end-of-run summaries.

use contracts::{ParseReport, Resolution, ResolutionStatus};
use metrics::{counter, gauge, histogram};

/// Record rows excluded by one parse
pub fn record_parse_report(report: &ParseReport) {
    if report.rows_skipped > 0 {
        counter!(
            "telemetry_overlay_rows_skipped_total",
            "dialect" => report.dialect.as_str()
        )
        .increment(report.rows_skipped as u64);
    }
}

/// Record one nearest-sample lookup
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_resolution;
///
/// let resolution = engine.resolve(playback_time);
/// record_resolution(&resolution);
/// ```
pub fn record_resolution(resolution: &Resolution) {
    counter!(
        "telemetry_overlay_resolutions_total",
        "status" => resolution.status().as_str()
    )
    .increment(1);

    if let Some(distance) = resolution.nearest_distance {
        histogram!("telemetry_overlay_resolve_distance_seconds").record(distance);
    }
}

/// Record an offset transition
pub fn record_offset_change(kind: &'static str, offset: f64) {
    counter!("telemetry_overlay_offset_changes_total", "kind" => kind).increment(1);
    gauge!("telemetry_overlay_sync_offset_seconds").set(offset);
}

/// Record one exporter run
pub fn record_export(exporter: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "telemetry_overlay_exports_total",
        "exporter" => exporter.to_string(),
        "status" => status
    )
    .increment(1);
}

/// Playback metrics aggregator
///
/// Aggregates per-tick resolutions in memory for the run summary.
#[derive(Debug, Clone, Default)]
pub struct PlaybackMetricsAggregator {
    /// Lookups performed
    pub total_ticks: u64,

    pub hits: u64,

    pub stale: u64,

    /// Lookups against an empty series
    pub empty: u64,

    /// Offset transitions applied
    pub offset_changes: u64,

    /// Distance to the nearest sample (seconds)
    pub distance_stats: RunningStats,

    /// Offset in effect per tick (seconds)
    pub offset_stats: RunningStats,
}

impl PlaybackMetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one resolution into the totals
    pub fn update(&mut self, resolution: &Resolution) {
        self.total_ticks += 1;
        match resolution.status() {
            ResolutionStatus::Hit => self.hits += 1,
            ResolutionStatus::Stale => self.stale += 1,
            ResolutionStatus::Empty => self.empty += 1,
        }

        if let Some(distance) = resolution.nearest_distance {
            self.distance_stats.push(distance);
        }
        self.offset_stats.push(resolution.offset);
    }

    pub fn record_offset_change(&mut self) {
        self.offset_changes += 1;
    }

    /// Build the summary report
    pub fn summary(&self) -> PlaybackSummary {
        PlaybackSummary {
            total_ticks: self.total_ticks,
            hits: self.hits,
            stale: self.stale,
            empty: self.empty,
            offset_changes: self.offset_changes,
            hit_rate: if self.total_ticks > 0 {
                self.hits as f64 / self.total_ticks as f64 * 100.0
            } else {
                0.0
            },
            distance_s: StatsSummary::from(&self.distance_stats),
            offset_s: StatsSummary::from(&self.offset_stats),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Playback summary
#[derive(Debug, Clone, Default)]
pub struct PlaybackSummary {
    pub total_ticks: u64,
    pub hits: u64,
    pub stale: u64,
    pub empty: u64,
    pub offset_changes: u64,
    pub hit_rate: f64,
    pub distance_s: StatsSummary,
    pub offset_s: StatsSummary,
}

impl std::fmt::Display for PlaybackSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Playback Summary ===")?;
        writeln!(f, "Ticks: {}", self.total_ticks)?;
        writeln!(f, "Telemetry hits: {} ({:.2}%)", self.hits, self.hit_rate)?;
        writeln!(f, "Stale lookups: {}", self.stale)?;
        if self.empty > 0 {
            writeln!(f, "Empty-series lookups: {}", self.empty)?;
        }
        writeln!(f, "Offset changes: {}", self.offset_changes)?;
        writeln!(f, "Nearest-sample distance (s): {}", self.distance_s)?;
        writeln!(f, "Offset (s): {}", self.offset_s)?;
        Ok(())
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a value
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
