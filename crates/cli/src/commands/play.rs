//! `play` command implementation.

use anyhow::Result;
use sync_engine::SyncEngine;
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::PlayArgs;
use crate::commands::{load_config, load_session, shutdown_signal};
use crate::error::CliError;
use crate::pipeline::{spawn_stdin_reader, Playback, PlaybackConfig};

/// Pending stdin commands before the reader blocks
const COMMAND_BUFFER: usize = 32;

/// Execute the `play` command
pub async fn run_play(args: &PlayArgs) -> Result<()> {
    let mut config = load_config(&args.source)?;
    if let Some(offset) = args.offset {
        if !offset.is_finite() {
            return Err(CliError::invalid_argument("offset", "must be a finite number").into());
        }
        config.sync.initial_offset_s = offset;
    }

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
        info!("Metrics endpoint available on port {}", args.metrics_port);
    }

    let session = load_session(&config).await?;
    let title = session.metadata.title();
    let engine = SyncEngine::new(session.series, config.sync.clone());

    let playback = Playback::new(
        engine,
        PlaybackConfig {
            fps: args.fps,
            start: args.start,
            end: args.end,
            report_every: args.report_every,
        },
    )?;

    if !title.is_empty() {
        println!("Session: {}", title);
    }
    println!(
        "Playing to video {:.2}s. Commands: set <video> <telemetry> | offset <s> | nudge <d> | +0.1 | + - (fine) | ++ -- (coarse) | reset | seek <s> | pause | resume | status | quit",
        playback.end_position()
    );

    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    spawn_stdin_reader(tx)?;

    let stats = playback.run(rx, shutdown_signal()).await;
    info!(
        ticks = stats.ticks,
        interrupted = stats.interrupted,
        final_offset = stats.final_offset,
        "Playback finished"
    );
    stats.print_summary();

    Ok(())
}
