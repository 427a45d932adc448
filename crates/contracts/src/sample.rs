//! TelemetrySample / TelemetrySeries - Ingestion output
//!
//! One normalized telemetry record and the immutable, time-ordered sequence
//! the sync engine looks samples up in.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::Deref;
use std::sync::Arc;

/// Metres per second to miles per hour, as applied to vendor logs.
pub const MS_TO_MPH: f64 = 2.237;

/// Miles per hour to kilometres per hour.
pub const MPH_TO_KPH: f64 = 1.609_344;

/// Single telemetry sample
///
/// Value type without identity beyond its timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Telemetry clock (seconds)
    pub timestamp: f64,

    /// Distance travelled (metres)
    pub distance: f64,

    /// Vehicle speed (mph)
    pub speed: f64,

    /// Engine speed
    pub rpm: f64,

    /// Selected gear (0 = neutral)
    pub gear: i32,

    /// Throttle position, percent 0-100
    pub throttle: f64,

    /// Brake position, percent 0-100
    pub brake: f64,
}

impl TelemetrySample {
    /// Sample with only a timestamp set
    pub fn at(timestamp: f64) -> Self {
        Self {
            timestamp,
            ..Default::default()
        }
    }

    /// Speed converted to km/h
    #[inline]
    pub fn speed_kph(&self) -> f64 {
        self.speed * MPH_TO_KPH
    }
}

/// Immutable telemetry series sorted by timestamp
///
/// Samples are stable-sorted on construction, so equal timestamps keep their
/// input order. Cloning only bumps a reference count, so one series can be
/// shared between the playback tick and any other reader.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySeries {
    samples: Arc<[TelemetrySample]>,
}

impl TelemetrySeries {
    /// Build a series from samples in arbitrary order
    pub fn from_samples(mut samples: Vec<TelemetrySample>) -> Self {
        samples.sort_by(|a, b| {
            a.timestamp
                .partial_cmp(&b.timestamp)
                .unwrap_or(Ordering::Equal)
        });
        Self {
            samples: samples.into(),
        }
    }

    /// Empty series
    pub fn empty() -> Self {
        Self::from_samples(Vec::new())
    }

    /// Samples as a slice
    #[inline]
    pub fn as_slice(&self) -> &[TelemetrySample] {
        &self.samples
    }

    /// Earliest and latest timestamp, if any
    pub fn time_range(&self) -> Option<(f64, f64)> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }

    /// Check the ordering invariant
    pub fn is_sorted(&self) -> bool {
        self.samples
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp)
    }
}

impl Default for TelemetrySeries {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for TelemetrySeries {
    type Target = [TelemetrySample];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.samples
    }
}

impl From<Vec<TelemetrySample>> for TelemetrySeries {
    fn from(samples: Vec<TelemetrySample>) -> Self {
        Self::from_samples(samples)
    }
}

impl FromIterator<TelemetrySample> for TelemetrySeries {
    fn from_iter<I: IntoIterator<Item = TelemetrySample>>(iter: I) -> Self {
        Self::from_samples(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tagged(timestamp: f64, rpm: f64) -> TelemetrySample {
        TelemetrySample {
            timestamp,
            rpm,
            ..Default::default()
        }
    }

    #[test]
    fn test_series_sorted_on_construction() {
        let series = TelemetrySeries::from_samples(vec![
            TelemetrySample::at(3.0),
            TelemetrySample::at(1.0),
            TelemetrySample::at(2.0),
        ]);

        let stamps: Vec<f64> = series.iter().map(|s| s.timestamp).collect();
        assert_eq!(stamps, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.time_range(), Some((1.0, 3.0)));
    }

    #[test]
    fn test_duplicate_timestamps_keep_input_order() {
        let series = TelemetrySeries::from_samples(vec![
            tagged(2.0, 1.0),
            tagged(1.0, 2.0),
            tagged(2.0, 3.0),
            tagged(2.0, 4.0),
        ]);

        let rpms: Vec<f64> = series.iter().map(|s| s.rpm).collect();
        assert_eq!(rpms, vec![2.0, 1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_empty_series() {
        let series = TelemetrySeries::empty();
        assert!(series.is_empty());
        assert_eq!(series.time_range(), None);
        assert!(series.is_sorted());
    }

    #[test]
    fn test_clone_shares_storage() {
        let series: TelemetrySeries = (0..100).map(|i| TelemetrySample::at(i as f64)).collect();
        let shared = series.clone();
        assert!(std::ptr::eq(series.as_slice(), shared.as_slice()));
    }

    #[test]
    fn test_speed_kph() {
        let sample = TelemetrySample {
            speed: 100.0,
            ..Default::default()
        };
        assert!((sample.speed_kph() - 160.9344).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_series_is_non_decreasing(stamps in prop::collection::vec(-1.0e4f64..1.0e4, 0..200)) {
            let series: TelemetrySeries = stamps.iter().map(|&t| TelemetrySample::at(t)).collect();
            prop_assert!(series.is_sorted());
            prop_assert_eq!(series.len(), stamps.len());
        }
    }
}
