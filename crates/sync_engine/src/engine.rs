//! Sync engine: one series, one offset cell, one lookup strategy

use contracts::{
    LookupStrategy, Resolution, SyncEngineConfig, SyncStatus, TelemetrySeries,
};
use tracing::{debug, info, instrument};

use crate::command::SyncCommand;
use crate::cursor::SeriesCursor;
use crate::offset::SyncOffset;
use crate::resolver::{build_resolution, nearest_linear};

/// Telemetry/video sync engine
///
/// Holds the loaded series read-only. The offset lives in a shared cell so
/// that a command context can adjust it through `offset_handle()` while the
/// playback tick keeps resolving.
#[derive(Debug)]
pub struct SyncEngine {
    series: TelemetrySeries,
    offset: SyncOffset,
    config: SyncEngineConfig,
    cursor: SeriesCursor,
}

impl SyncEngine {
    /// Create an engine at the configured initial offset
    pub fn new(series: TelemetrySeries, config: SyncEngineConfig) -> Self {
        let offset = SyncOffset::new(config.initial_offset_s);
        info!(
            samples = series.len(),
            initial_offset = offset.get(),
            lookup = ?config.lookup,
            "sync engine ready"
        );
        Self {
            series,
            offset,
            config,
            cursor: SeriesCursor::new(),
        }
    }

    pub fn series(&self) -> &TelemetrySeries {
        &self.series
    }

    pub fn config(&self) -> &SyncEngineConfig {
        &self.config
    }

    /// Current offset (seconds)
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset.get()
    }

    /// Shared handle for issuing commands from another task
    pub fn offset_handle(&self) -> SyncOffset {
        self.offset.clone()
    }

    /// Telemetry time range, for the user's reference when aligning
    pub fn time_range(&self) -> Option<(f64, f64)> {
        self.series.time_range()
    }

    /// Apply an offset transition
    ///
    /// Returns the new offset, or `None` when the command was rejected and
    /// the offset is unchanged.
    #[instrument(name = "sync_engine_apply", skip(self, command), fields(command = %command))]
    pub fn apply(&self, command: SyncCommand) -> Option<f64> {
        let result = self.offset.apply(&command);
        match result {
            Some(offset) => {
                debug!(offset, "offset updated");
                observability::record_offset_change(command.kind(), offset);
            }
            None => debug!("command ignored"),
        }
        result
    }

    /// Replace the whole series; the offset is kept
    pub fn reload(&mut self, series: TelemetrySeries) {
        info!(
            previous = self.series.len(),
            samples = series.len(),
            "series reloaded"
        );
        self.series = series;
        self.cursor.reset();
    }

    /// Playback time on the telemetry clock
    #[inline]
    pub fn synced_time(&self, playback_time: f64) -> f64 {
        playback_time + self.offset.get()
    }

    /// Resolve the sample for a playback position
    #[instrument(level = "trace", name = "sync_engine_resolve", skip(self))]
    pub fn resolve(&mut self, playback_time: f64) -> Resolution {
        // One read per tick so every field agrees on the offset
        let offset = self.offset.get();
        let synced = playback_time + offset;

        let nearest = match self.config.lookup {
            LookupStrategy::Linear => nearest_linear(&self.series, synced),
            LookupStrategy::Cursor => self.cursor.nearest(&self.series, synced),
        };

        let resolution = build_resolution(
            &self.series,
            nearest,
            playback_time,
            offset,
            self.config.staleness_threshold_s,
        );
        observability::record_resolution(&resolution);
        resolution
    }

    /// Status line data for a playback position
    pub fn status(&self, playback_time: f64) -> SyncStatus {
        let offset = self.offset.get();
        SyncStatus {
            video_time: playback_time,
            offset,
            synced_time: playback_time + offset,
            samples_loaded: self.series.len(),
        }
    }

    /// Offset clamped to the slider range, for display
    pub fn slider_position(&self) -> f64 {
        self.config.clamp_to_slider(self.offset.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{ResolutionStatus, TelemetrySample};

    fn engine(timestamps: &[f64], lookup: LookupStrategy) -> SyncEngine {
        let series = timestamps.iter().map(|&t| TelemetrySample::at(t)).collect();
        SyncEngine::new(
            series,
            SyncEngineConfig {
                initial_offset_s: 0.0,
                lookup,
                ..SyncEngineConfig::default()
            },
        )
    }

    #[test]
    fn test_default_initial_offset() {
        let engine = SyncEngine::new(TelemetrySeries::empty(), SyncEngineConfig::default());
        assert_eq!(engine.offset(), -1.090);
    }

    #[test]
    fn test_resolve_both_strategies() {
        for lookup in [LookupStrategy::Linear, LookupStrategy::Cursor] {
            let mut engine = engine(&[4.0, 5.05, 6.0], lookup);
            let r = engine.resolve(5.0);
            assert_eq!(r.sample.map(|s| s.timestamp), Some(5.05), "{lookup:?}");
            assert_eq!(r.status(), ResolutionStatus::Hit);
        }
    }

    #[test]
    fn test_resolve_stale_and_empty() {
        let mut engine = engine(&[10.0, 20.0], LookupStrategy::Cursor);
        let r = engine.resolve(0.0);
        assert_eq!(r.status(), ResolutionStatus::Stale);
        assert_eq!(r.nearest_distance, Some(10.0));

        engine.reload(TelemetrySeries::empty());
        assert_eq!(engine.resolve(0.0).status(), ResolutionStatus::Empty);
    }

    #[test]
    fn test_apply_commands() {
        let engine = engine(&[], LookupStrategy::Cursor);
        assert_eq!(
            engine.apply(SyncCommand::SetAbsolute {
                video: 3.0,
                telemetry: 3.5
            }),
            Some(0.5)
        );
        let nudged = engine.apply(SyncCommand::Nudge(-0.1)).unwrap();
        assert!((nudged - 0.4).abs() < 1e-9);
        assert_eq!(engine.apply(SyncCommand::SetDirect(f64::NAN)), None);
        assert!((engine.offset() - 0.4).abs() < 1e-9);
        assert_eq!(engine.apply(SyncCommand::Reset), Some(0.0));
        assert_eq!(engine.apply(SyncCommand::Reset), Some(0.0));
    }

    #[test]
    fn test_offset_handle_changes_resolution() {
        let mut engine = engine(&[0.0, 1.0, 2.0, 3.0], LookupStrategy::Cursor);
        let handle = engine.offset_handle();
        assert_eq!(engine.resolve(1.0).sample.map(|s| s.timestamp), Some(1.0));

        handle.set_direct(2.0);
        let r = engine.resolve(1.0);
        assert_eq!(r.offset, 2.0);
        assert_eq!(r.synced_time, 3.0);
        assert_eq!(r.sample.map(|s| s.timestamp), Some(3.0));
    }

    #[test]
    fn test_status_and_slider() {
        let engine = engine(&[0.0, 1.0], LookupStrategy::Linear);
        engine.apply(SyncCommand::SetDirect(-1.09));
        let status = engine.status(12.0);
        assert_eq!(status.samples_loaded, 2);
        assert!((status.synced_time - 10.91).abs() < 1e-9);
        assert!(status.to_string().starts_with("Video 12.00s -> Telemetry 10.91s"));

        engine.apply(SyncCommand::SetDirect(25.0));
        assert_eq!(engine.slider_position(), 10.0);
        assert_eq!(engine.offset(), 25.0);
    }

    #[test]
    fn test_time_range() {
        let engine = engine(&[3.0, 1.0, 2.0], LookupStrategy::Linear);
        assert_eq!(engine.time_range(), Some((1.0, 3.0)));
    }
}
