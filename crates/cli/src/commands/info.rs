//! `info` command implementation.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use contracts::{LogDialect, SessionMetadata, SessionStats};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::commands::{load_config, load_session};

/// Session info for JSON output
#[derive(Serialize)]
struct SessionInfo {
    telemetry_path: String,
    dialect: LogDialect,
    metadata: MetadataInfo,
    stats: SessionStats,
}

#[derive(Serialize)]
struct MetadataInfo {
    title: String,
    format: String,
    venue: String,
    vehicle: String,
    driver: String,
    log_date: String,
    log_time: String,
    sample_rate: f64,
    duration: f64,
    lap_range: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    extra: BTreeMap<String, String>,
}

impl MetadataInfo {
    fn new(metadata: &SessionMetadata, with_extra: bool) -> Self {
        Self {
            title: metadata.title(),
            format: metadata.format.clone(),
            venue: metadata.venue.clone(),
            vehicle: metadata.vehicle.clone(),
            driver: metadata.driver.clone(),
            log_date: metadata.log_date.clone(),
            log_time: metadata.log_time.clone(),
            sample_rate: metadata.sample_rate,
            duration: metadata.duration,
            lap_range: metadata.lap_range.clone(),
            extra: if with_extra {
                metadata.extra.clone()
            } else {
                BTreeMap::new()
            },
        }
    }
}

/// Execute the `info` command
pub async fn run_info(args: &InfoArgs) -> Result<()> {
    let config = load_config(&args.source)?;
    info!(telemetry = %config.sources.telemetry.display(), "Loading session info");

    let session = load_session(&config).await?;
    let session_info = SessionInfo {
        telemetry_path: config.sources.telemetry.display().to_string(),
        dialect: session.report.dialect,
        metadata: MetadataInfo::new(&session.metadata, args.extra),
        stats: ingestion::compute_stats(&session.series),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&session_info)
            .context("Failed to serialize session info")?;
        println!("{}", json);
    } else {
        print_session_info(&session_info);
    }

    Ok(())
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn print_session_info(info: &SessionInfo) {
    let m = &info.metadata;
    let s = &info.stats;

    println!("\n=== Session Information ===\n");
    println!("Telemetry: {} ({})", info.telemetry_path, info.dialect);
    if !m.title.is_empty() {
        println!("Title: {}", m.title);
    }

    println!("\nMetadata:");
    println!("  ├─ Format: {}", or_dash(&m.format));
    println!("  ├─ Venue: {}", or_dash(&m.venue));
    println!("  ├─ Vehicle: {}", or_dash(&m.vehicle));
    println!("  ├─ Driver: {}", or_dash(&m.driver));
    println!("  ├─ Logged: {} {}", or_dash(&m.log_date), m.log_time);
    println!("  ├─ Sample rate: {:.1} Hz", m.sample_rate);
    println!("  ├─ Duration: {:.3}s", m.duration);
    println!("  └─ Range: {}", or_dash(&m.lap_range));

    if !m.extra.is_empty() {
        println!("\nExtra keys:");
        let last = m.extra.len() - 1;
        for (i, (key, value)) in m.extra.iter().enumerate() {
            let branch = if i == last { "└─" } else { "├─" };
            println!("  {} {}: {}", branch, key, value);
        }
    }

    println!("\nStatistics:");
    println!("  ├─ Samples: {}", s.num_samples);
    match s.time_range {
        Some((start, end)) => println!("  ├─ Time range: {:.3}s - {:.3}s", start, end),
        None => println!("  ├─ Time range: (empty)"),
    }
    println!("  ├─ Distance: {:.1}m", s.total_distance_m);
    println!(
        "  ├─ Speed: max {:.1} mph / {:.1} km/h, avg {:.1} mph / {:.1} km/h",
        s.max_speed_mph, s.max_speed_kph, s.avg_speed_mph, s.avg_speed_kph
    );
    println!("  └─ RPM: max {:.0}, avg {:.0}", s.max_rpm, s.avg_rpm);
    println!();
}
