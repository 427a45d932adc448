//! Nearest-sample lookup, linear reference

use contracts::{
    Resolution, TelemetrySample, TelemetrySeries, DEFAULT_STALENESS_THRESHOLD_S,
};

/// Index and distance of the nearest sample by `|timestamp - target|`
///
/// Full scan; on ties the first minimum wins. `None` for an empty slice or a
/// non-finite target.
pub fn nearest_linear(samples: &[TelemetrySample], target: f64) -> Option<(usize, f64)> {
    if !target.is_finite() {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for (idx, sample) in samples.iter().enumerate() {
        let distance = (sample.timestamp - target).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((idx, distance)),
        }
    }
    best
}

/// Build a `Resolution` from a nearest-sample hit
///
/// A distance strictly above `threshold` is stale; exactly at the
/// threshold still counts.
pub fn build_resolution(
    samples: &[TelemetrySample],
    nearest: Option<(usize, f64)>,
    playback_time: f64,
    offset: f64,
    threshold: f64,
) -> Resolution {
    let sample = nearest
        .filter(|&(_, distance)| distance <= threshold)
        .map(|(idx, _)| samples[idx]);

    Resolution {
        playback_time,
        offset,
        synced_time: playback_time + offset,
        sample,
        nearest_distance: nearest.map(|(_, distance)| distance),
    }
}

/// Telemetry sample for a playback position
///
/// `synced = playback_time + offset`; the nearest sample is returned unless
/// the series is empty or the match is more than 1 s away.
pub fn resolve(
    series: &TelemetrySeries,
    playback_time: f64,
    offset: f64,
) -> Option<TelemetrySample> {
    resolve_with_threshold(series, playback_time, offset, DEFAULT_STALENESS_THRESHOLD_S).sample
}

/// `resolve` with an explicit staleness threshold and full diagnostics
pub fn resolve_with_threshold(
    series: &TelemetrySeries,
    playback_time: f64,
    offset: f64,
    threshold: f64,
) -> Resolution {
    let synced = playback_time + offset;
    let nearest = nearest_linear(series, synced);
    build_resolution(series, nearest, playback_time, offset, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(timestamps: &[f64]) -> TelemetrySeries {
        timestamps.iter().map(|&t| TelemetrySample::at(t)).collect()
    }

    #[test]
    fn test_resolve_nearest() {
        let s = series(&[4.0, 5.05, 6.0]);
        let hit = resolve(&s, 5.0, 0.0).unwrap();
        assert_eq!(hit.timestamp, 5.05);
    }

    #[test]
    fn test_resolve_stale() {
        let s = series(&[10.0, 20.0]);
        assert!(resolve(&s, 0.0, 0.0).is_none());

        let diag = resolve_with_threshold(&s, 0.0, 0.0, 1.0);
        assert_eq!(diag.nearest_distance, Some(10.0));
    }

    #[test]
    fn test_resolve_empty() {
        let diag = resolve_with_threshold(&TelemetrySeries::empty(), 3.0, 1.0, 1.0);
        assert!(diag.sample.is_none());
        assert!(diag.nearest_distance.is_none());
        assert_eq!(diag.synced_time, 4.0);
    }

    #[test]
    fn test_resolve_threshold_inclusive() {
        let s = series(&[2.0]);
        assert!(resolve(&s, 1.0, 0.0).is_some());
        assert!(resolve(&s, 0.99, 0.0).is_none());
    }

    #[test]
    fn test_resolve_applies_offset() {
        let s = series(&[0.0, 1.0, 2.0, 3.0]);
        let hit = resolve(&s, 12.0, -10.1).unwrap();
        assert_eq!(hit.timestamp, 2.0);
    }

    #[test]
    fn test_first_minimum_wins() {
        // 1.0 and 3.0 are both 1.0 away from 2.0
        let samples = [TelemetrySample::at(1.0), TelemetrySample::at(3.0)];
        assert_eq!(nearest_linear(&samples, 2.0), Some((0, 1.0)));

        // duplicate timestamps: first one
        let mut dup = [TelemetrySample::at(5.0), TelemetrySample::at(5.0)];
        dup[1].rpm = 9000.0;
        assert_eq!(nearest_linear(&dup, 5.0), Some((0, 0.0)));
    }

    #[test]
    fn test_non_finite_target() {
        let samples = [TelemetrySample::at(1.0)];
        assert_eq!(nearest_linear(&samples, f64::NAN), None);
        assert_eq!(nearest_linear(&samples, f64::INFINITY), None);
    }
}
