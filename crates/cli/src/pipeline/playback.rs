//! Simulated video transport.
//!
//! Advances a playback clock at a fixed tick rate and resolves the telemetry
//! sample for every tick, while sync and transport commands arrive
//! concurrently on a channel.

use std::future::Future;
use std::io::BufRead;
use std::str::FromStr;
use std::time::{Duration, Instant};

use contracts::Resolution;
use sync_engine::{CommandParseError, SyncCommand, SyncEngine};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::PlaybackStats;
use crate::error::{CliError, Result};

/// Command accepted while playing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    /// Offset transition
    Sync(SyncCommand),
    /// Step nudge: `+`/`-` fine, `++`/`--` coarse
    Step { forward: bool, coarse: bool },
    /// Jump to a video time (seconds)
    Seek(f64),
    Pause,
    Resume,
    /// Print the current status line
    Status,
    Quit,
}

impl FromStr for PlayerCommand {
    type Err = CommandParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let head = tokens.next().ok_or(CommandParseError::Empty)?;

        let command = match head.to_ascii_lowercase().as_str() {
            "+" | "-" | "++" | "--" => PlayerCommand::Step {
                forward: head.starts_with('+'),
                coarse: head.len() == 2,
            },
            "seek" => {
                let token = tokens.next().ok_or(CommandParseError::MissingArgument {
                    command: "seek",
                    expected: "<seconds>",
                })?;
                let position = token
                    .parse::<f64>()
                    .ok()
                    .filter(|p| p.is_finite())
                    .ok_or_else(|| CommandParseError::InvalidNumber {
                        value: token.to_string(),
                    })?;
                PlayerCommand::Seek(position)
            }
            "pause" => PlayerCommand::Pause,
            "resume" | "play" => PlayerCommand::Resume,
            "status" => PlayerCommand::Status,
            "quit" | "exit" => PlayerCommand::Quit,
            _ => return s.parse().map(PlayerCommand::Sync),
        };

        let rest: Vec<&str> = tokens.collect();
        if !rest.is_empty() {
            return Err(CommandParseError::Trailing(rest.join(" ")));
        }
        Ok(command)
    }
}

/// Highest tick rate; keeps the tick period at or above 1 ms
pub const MAX_FPS: f64 = 1000.0;

/// Playback settings
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Ticks per second of video
    pub fps: f64,

    /// Video time of the first tick
    pub start: f64,

    /// Video time to stop at; end of telemetry when `None`
    pub end: Option<f64>,

    /// Seconds of video between status lines (0 = never)
    pub report_every: f64,
}

enum Flow {
    Continue,
    Quit,
}

/// Tick-driven player over a sync engine
pub struct Playback {
    engine: SyncEngine,
    config: PlaybackConfig,
    position: f64,
    paused: bool,
    next_report: f64,
}

impl Playback {
    pub fn new(engine: SyncEngine, config: PlaybackConfig) -> Result<Self> {
        if !config.fps.is_finite() || config.fps <= 0.0 || config.fps > MAX_FPS {
            return Err(CliError::invalid_argument(
                "fps",
                format!("must be in (0, {MAX_FPS}], got {}", config.fps),
            ));
        }
        if !config.start.is_finite() || config.start < 0.0 {
            return Err(CliError::invalid_argument(
                "start",
                format!("must be a non-negative number, got {}", config.start),
            ));
        }
        if let Some(end) = config.end {
            if !end.is_finite() {
                return Err(CliError::invalid_argument(
                    "end",
                    format!("must be a finite number, got {end}"),
                ));
            }
        }
        if !config.report_every.is_finite() || config.report_every < 0.0 {
            return Err(CliError::invalid_argument(
                "report-every",
                format!("must be a non-negative number, got {}", config.report_every),
            ));
        }

        Ok(Self {
            position: config.start,
            next_report: config.start,
            paused: false,
            engine,
            config,
        })
    }

    /// Video time at which playback stops
    ///
    /// Defaults to the video time that maps onto the last sample under the
    /// starting offset.
    pub fn end_position(&self) -> f64 {
        self.config
            .end
            .or_else(|| {
                self.engine
                    .time_range()
                    .map(|(_, last)| last - self.engine.offset())
            })
            .unwrap_or(self.config.start)
    }

    /// Play until the end position, `quit`, or `shutdown` resolves
    pub async fn run<S>(
        mut self,
        mut commands: mpsc::Receiver<PlayerCommand>,
        shutdown: S,
    ) -> PlaybackStats
    where
        S: Future<Output = ()>,
    {
        let started = Instant::now();
        let step = 1.0 / self.config.fps;
        let end = self.end_position();

        let mut interval = tokio::time::interval(Duration::from_secs_f64(step));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let mut stats = PlaybackStats::default();
        let mut commands_open = true;

        info!(
            start = self.position,
            end,
            fps = self.config.fps,
            offset = self.engine.offset(),
            "Playback started"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    warn!("Received shutdown signal, stopping playback...");
                    stats.interrupted = true;
                    break;
                }
                command = commands.recv(), if commands_open => match command {
                    Some(command) => {
                        if let Flow::Quit = self.handle(command, &mut stats) {
                            stats.interrupted = true;
                            break;
                        }
                    }
                    None => {
                        debug!("Command channel closed");
                        commands_open = false;
                    }
                },
                _ = interval.tick() => {
                    if self.paused {
                        continue;
                    }

                    let resolution = self.engine.resolve(self.position);
                    stats.metrics.update(&resolution);
                    stats.ticks += 1;
                    self.maybe_report(&resolution);

                    if self.position >= end {
                        info!(position = self.position, "Reached end of playback");
                        break;
                    }
                    self.position += step;
                }
            }
        }

        stats.final_position = self.position;
        stats.final_offset = self.engine.offset();
        stats.duration = started.elapsed();
        stats
    }

    fn handle(&mut self, command: PlayerCommand, stats: &mut PlaybackStats) -> Flow {
        debug!(?command, "Player command");
        match command {
            PlayerCommand::Sync(sync) => self.apply_sync(sync, stats),
            PlayerCommand::Step { forward, coarse } => {
                let step = self.engine.config().step(coarse);
                let delta = if forward { step } else { -step };
                self.apply_sync(SyncCommand::Nudge(delta), stats);
            }
            PlayerCommand::Seek(position) => {
                self.position = position.max(0.0);
                self.next_report = self.position;
                info!(position = self.position, "Seek");
            }
            PlayerCommand::Pause => {
                self.paused = true;
                info!(position = self.position, "Paused");
            }
            PlayerCommand::Resume => {
                self.paused = false;
                info!(position = self.position, "Resumed");
            }
            PlayerCommand::Status => println!("{}", self.engine.status(self.position)),
            PlayerCommand::Quit => {
                info!("Quit requested");
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    fn apply_sync(&mut self, sync: SyncCommand, stats: &mut PlaybackStats) {
        match self.engine.apply(sync) {
            Some(offset) => {
                stats.metrics.record_offset_change();
                println!(
                    "Offset {:.3}s (slider {:.2}s) | {}",
                    offset,
                    self.engine.slider_position(),
                    self.engine.status(self.position)
                );
            }
            None => warn!(command = %sync, "Command ignored, offset unchanged"),
        }
    }

    fn maybe_report(&mut self, resolution: &Resolution) {
        if self.config.report_every <= 0.0 || self.position < self.next_report {
            return;
        }
        self.next_report = self.position + self.config.report_every;

        let status = self.engine.status(self.position);
        match resolution.sample {
            Some(sample) => println!(
                "{} | {:5.1} mph {:5.0} rpm gear {} throttle {:3.0}% brake {:3.0}%",
                status, sample.speed, sample.rpm, sample.gear, sample.throttle, sample.brake
            ),
            None => println!("{} | no telemetry", status),
        }
    }
}

/// Forward stdin lines as player commands
///
/// Runs on a plain thread so a pending read never holds up runtime shutdown.
pub fn spawn_stdin_reader(tx: mpsc::Sender<PlayerCommand>) -> Result<()> {
    std::thread::Builder::new()
        .name("stdin-commands".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!(error = %e, "Failed to read stdin");
                        break;
                    }
                };
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                match input.parse::<PlayerCommand>() {
                    Ok(command) => {
                        if tx.blocking_send(command).is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!(input, error = %e, "Unrecognised command"),
                }
            }
        })?;
    Ok(())
}
