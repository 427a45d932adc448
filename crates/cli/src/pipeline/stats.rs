//! Pipeline and playback statistics.

use std::time::Duration;

use contracts::{ParseReport, SessionStats};
use exporter::ExportReport;
use observability::PlaybackMetricsAggregator;

/// Statistics from a batch pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Session title from the metadata sidecar
    pub title: String,

    /// Parse diagnostics
    pub report: Option<ParseReport>,

    /// Summary statistics of the loaded series
    pub session: SessionStats,

    /// Export outcome; `None` on dry runs
    pub exports: Option<ExportReport>,

    /// Total duration of the pipeline run
    pub duration: Duration,
}

impl PipelineStats {
    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Telemetry Statistics ===\n");

        if !self.title.is_empty() {
            println!("Session: {}", self.title);
        }
        if let Some(ref report) = self.report {
            println!(
                "Dialect: {} ({} rows accepted, {} skipped)",
                report.dialect, report.rows_accepted, report.rows_skipped
            );
        }

        let s = &self.session;
        println!("Samples: {}", s.num_samples);
        println!("Duration: {:.2}s", s.duration_s);
        if let Some((start, end)) = s.time_range {
            println!("Time range: {:.2}s - {:.2}s", start, end);
        }
        println!("Distance: {:.1}m", s.total_distance_m);
        println!(
            "Speed: max {:.1} mph ({:.1} km/h), avg {:.1} mph ({:.1} km/h)",
            s.max_speed_mph, s.max_speed_kph, s.avg_speed_mph, s.avg_speed_kph
        );
        println!("RPM: max {:.0}, avg {:.0}", s.max_rpm, s.avg_rpm);

        if let Some(ref exports) = self.exports {
            println!("\nExports ({}):", exports.artifacts.len());
            for artifact in &exports.artifacts {
                match artifact.path {
                    Some(ref path) => println!(
                        "  - {}: {} ({} records)",
                        artifact.exporter,
                        path.display(),
                        artifact.records
                    ),
                    None => println!("  - {}: {} records", artifact.exporter, artifact.records),
                }
            }
            for failure in &exports.failures {
                println!("  ! {}: {}", failure.exporter, failure.message);
            }
        }

        println!("\nCompleted in {:.3}s\n", self.duration.as_secs_f64());
    }
}

/// Statistics from a simulated playback run
#[derive(Debug, Clone, Default)]
pub struct PlaybackStats {
    /// Ticks resolved while playing
    pub ticks: u64,

    /// Video time when playback stopped
    pub final_position: f64,

    /// Offset when playback stopped
    pub final_offset: f64,

    /// Whether playback stopped on a signal or `quit`
    pub interrupted: bool,

    /// Wall-clock duration
    pub duration: Duration,

    /// Per-tick lookup aggregation
    pub metrics: PlaybackMetricsAggregator,
}

impl PlaybackStats {
    /// Print detailed summary
    pub fn print_summary(&self) {
        println!();
        print!("{}", self.metrics.summary());
        println!(
            "Stopped at video {:.2}s with offset {:.3}s{}",
            self.final_position,
            self.final_offset,
            if self.interrupted { " (interrupted)" } else { "" }
        );
        println!("Wall time: {:.2}s\n", self.duration.as_secs_f64());
    }
}
