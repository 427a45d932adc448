//! Shared offset cell

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::command::SyncCommand;

/// Offset between playback and telemetry clocks (seconds)
///
/// `telemetry_time = playback_time + offset`. Stored as f64 bits in an
/// atomic, so a command task and the playback tick can share clones of the
/// same cell. Writes happen only through the transitions below; each returns
/// the new offset, or `None` when the input was rejected and nothing changed.
#[derive(Debug, Clone)]
pub struct SyncOffset {
    bits: Arc<AtomicU64>,
}

impl SyncOffset {
    /// Non-finite initial values start at 0
    pub fn new(initial: f64) -> Self {
        let initial = if initial.is_finite() { initial } else { 0.0 };
        Self {
            bits: Arc::new(AtomicU64::new(initial.to_bits())),
        }
    }

    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    fn store(&self, value: f64) -> f64 {
        self.bits.store(value.to_bits(), Ordering::Release);
        value
    }

    /// Align `video` on the playback clock with `telemetry` on the log clock
    pub fn set_absolute(&self, video: f64, telemetry: f64) -> Option<f64> {
        if !video.is_finite() || !telemetry.is_finite() {
            return None;
        }
        let offset = telemetry - video;
        offset.is_finite().then(|| self.store(offset))
    }

    /// `set_absolute` from raw text fields; unparsable input is a no-op
    pub fn set_absolute_text(&self, video: &str, telemetry: &str) -> Option<f64> {
        let video = video.trim().parse::<f64>().ok()?;
        let telemetry = telemetry.trim().parse::<f64>().ok()?;
        self.set_absolute(video, telemetry)
    }

    /// Any finite offset is accepted
    pub fn set_direct(&self, offset: f64) -> Option<f64> {
        offset.is_finite().then(|| self.store(offset))
    }

    pub fn nudge(&self, delta: f64) -> Option<f64> {
        if !delta.is_finite() {
            return None;
        }
        self.bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                let next = f64::from_bits(bits) + delta;
                next.is_finite().then(|| next.to_bits())
            })
            .ok()
            .map(|prev| f64::from_bits(prev) + delta)
    }

    /// Back to zero; idempotent
    pub fn reset(&self) -> f64 {
        self.store(0.0)
    }

    /// Apply a parsed command
    pub fn apply(&self, command: &SyncCommand) -> Option<f64> {
        match *command {
            SyncCommand::SetAbsolute { video, telemetry } => self.set_absolute(video, telemetry),
            SyncCommand::SetDirect(offset) => self.set_direct(offset),
            SyncCommand::Nudge(delta) => self.nudge(delta),
            SyncCommand::Reset => Some(self.reset()),
        }
    }
}

impl Default for SyncOffset {
    fn default() -> Self {
        Self::new(contracts::DEFAULT_INITIAL_OFFSET_S)
    }
}
