//! `resolve` command implementation.

use anyhow::{Context, Result};
use contracts::{Resolution, ResolutionStatus, TelemetrySample};
use serde::Serialize;
use sync_engine::SyncEngine;
use tracing::info;

use crate::cli::ResolveArgs;
use crate::commands::{load_config, load_session};

#[derive(Serialize)]
struct ResolvedTime {
    video_time: f64,
    offset: f64,
    telemetry_time: f64,
    status: ResolutionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    nearest_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample: Option<TelemetrySample>,
}

impl From<&Resolution> for ResolvedTime {
    fn from(r: &Resolution) -> Self {
        Self {
            video_time: r.playback_time,
            offset: r.offset,
            telemetry_time: r.synced_time,
            status: r.status(),
            nearest_distance: r.nearest_distance,
            sample: r.sample,
        }
    }
}

/// Execute the `resolve` command
pub async fn run_resolve(args: &ResolveArgs) -> Result<()> {
    let mut config = load_config(&args.source)?;
    if let Some(offset) = args.offset {
        if !offset.is_finite() {
            anyhow::bail!("Offset must be a finite number, got {}", offset);
        }
        config.sync.initial_offset_s = offset;
    }

    let session = load_session(&config).await?;
    let mut engine = SyncEngine::new(session.series, config.sync.clone());

    info!(
        offset = engine.offset(),
        queries = args.times.len(),
        "Resolving video times"
    );

    let resolved: Vec<ResolvedTime> = args
        .times
        .iter()
        .map(|&t| ResolvedTime::from(&engine.resolve(t)))
        .collect();

    if args.json {
        let json =
            serde_json::to_string_pretty(&resolved).context("Failed to serialize resolutions")?;
        println!("{}", json);
    } else {
        if let Some((start, end)) = engine.time_range() {
            println!("Telemetry range: {:.2}s - {:.2}s", start, end);
        }
        for r in &resolved {
            print_resolved(r);
        }
    }

    Ok(())
}

fn print_resolved(r: &ResolvedTime) {
    print!(
        "Video {:.2}s -> Telemetry {:.2}s (offset {:.3}s): ",
        r.video_time, r.telemetry_time, r.offset
    );
    match (&r.sample, r.nearest_distance) {
        (Some(sample), _) => println!(
            "t={:.3}s {:.1} mph {:.0} rpm gear {} throttle {:.0}% brake {:.0}%",
            sample.timestamp, sample.speed, sample.rpm, sample.gear, sample.throttle, sample.brake
        ),
        (None, Some(distance)) => {
            println!("no telemetry (nearest sample {:.3}s away)", distance)
        }
        (None, None) => println!("no telemetry loaded"),
    }
}
