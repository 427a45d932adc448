//! Cached cursor lookup
//!
//! Playback mostly moves forward in small steps, so the cursor remembers
//! where the previous query landed and walks forward from there. Seeks and
//! offset changes that move backwards (or far ahead) fall back to binary
//! search. Results match `nearest_linear` exactly, including tie-breaks.

use contracts::TelemetrySample;

/// Samples walked before switching to binary search
const FORWARD_SCAN_LIMIT: usize = 16;

#[derive(Debug, Clone, Default)]
pub struct SeriesCursor {
    /// First index whose timestamp was >= the previous target
    next: usize,
}

impl SeriesCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the cached position (series replaced)
    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// First index with `timestamp >= target`
    fn upper_bound(&self, samples: &[TelemetrySample], target: f64) -> usize {
        let mut idx = self.next.min(samples.len());

        let cached_is_behind = idx == 0 || samples[idx - 1].timestamp < target;
        if !cached_is_behind {
            return samples[..idx].partition_point(|s| s.timestamp < target);
        }

        for _ in 0..FORWARD_SCAN_LIMIT {
            if idx == samples.len() || samples[idx].timestamp >= target {
                return idx;
            }
            idx += 1;
        }
        idx + samples[idx..].partition_point(|s| s.timestamp < target)
    }

    /// Same contract as `nearest_linear`
    pub fn nearest(&mut self, samples: &[TelemetrySample], target: f64) -> Option<(usize, f64)> {
        if samples.is_empty() || !target.is_finite() {
            return None;
        }

        let upper = self.upper_bound(samples, target);
        self.next = upper;

        // Right of `upper` distances only grow, so `upper` is the best there.
        let above = (upper < samples.len()).then(|| (upper, samples[upper].timestamp - target));

        // Left of `upper` distances shrink towards `upper - 1`; take the first
        // index that reaches that minimum so equal distances resolve like the
        // linear scan.
        let below = (upper > 0).then(|| {
            let best = target - samples[upper - 1].timestamp;
            let first = samples[..upper].partition_point(|s| target - s.timestamp > best);
            (first, best)
        });

        match (below, above) {
            (Some(lo), Some(hi)) => Some(if lo.1 <= hi.1 { lo } else { hi }),
            (lo, hi) => lo.or(hi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::nearest_linear;
    use proptest::prelude::*;

    fn samples(timestamps: &[f64]) -> Vec<TelemetrySample> {
        timestamps.iter().map(|&t| TelemetrySample::at(t)).collect()
    }

    #[test]
    fn test_forward_playback() {
        let data = samples(&[0.0, 0.02, 0.04, 0.06, 0.08, 0.1]);
        let mut cursor = SeriesCursor::new();
        for (i, target) in [0.0, 0.019, 0.041, 0.07, 0.2].into_iter().enumerate() {
            assert_eq!(
                cursor.nearest(&data, target),
                nearest_linear(&data, target),
                "query {i}"
            );
        }
    }

    #[test]
    fn test_backward_seek() {
        let data = samples(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let mut cursor = SeriesCursor::new();
        assert_eq!(cursor.nearest(&data, 3.9), Some((4, data[4].timestamp - 3.9)));
        assert_eq!(cursor.nearest(&data, 0.4), nearest_linear(&data, 0.4));
        assert_eq!(cursor.nearest(&data, 0.4).map(|(i, _)| i), Some(0));
    }

    #[test]
    fn test_far_forward_jump() {
        let timestamps: Vec<f64> = (0..1000).map(|i| i as f64 * 0.02).collect();
        let data = samples(&timestamps);
        let mut cursor = SeriesCursor::new();
        cursor.nearest(&data, 0.1);
        assert_eq!(cursor.nearest(&data, 15.013), nearest_linear(&data, 15.013));
    }

    #[test]
    fn test_tie_prefers_earlier_sample() {
        let data = samples(&[1.0, 3.0]);
        let mut cursor = SeriesCursor::new();
        assert_eq!(cursor.nearest(&data, 2.0), Some((0, 1.0)));
    }

    #[test]
    fn test_duplicate_timestamps() {
        let data = samples(&[1.0, 2.0, 2.0, 2.0, 5.0]);
        let mut cursor = SeriesCursor::new();
        assert_eq!(cursor.nearest(&data, 2.0), Some((1, 0.0)));
        assert_eq!(cursor.nearest(&data, 2.4), Some((1, 2.4 - 2.0)));
        assert_eq!(cursor.nearest(&data, 1.6), nearest_linear(&data, 1.6));
    }

    #[test]
    fn test_empty_and_non_finite() {
        let mut cursor = SeriesCursor::new();
        assert_eq!(cursor.nearest(&[], 1.0), None);
        assert_eq!(cursor.nearest(&samples(&[1.0]), f64::NAN), None);
    }

    #[test]
    fn test_cursor_survives_shorter_series() {
        let mut cursor = SeriesCursor::new();
        let long = samples(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        cursor.nearest(&long, 5.0);

        let short = samples(&[0.0, 1.0]);
        assert_eq!(cursor.nearest(&short, 0.8), Some((1, 1.0 - 0.8)));
    }

    fn sorted_timestamps() -> impl Strategy<Value = Vec<f64>> {
        // coarse grid values so duplicates and exact ties show up
        prop::collection::vec((-200i32..200).prop_map(|v| v as f64 * 0.25), 0..80).prop_map(
            |mut v| {
                v.sort_by(|a, b| a.total_cmp(b));
                v
            },
        )
    }

    fn query() -> impl Strategy<Value = f64> {
        prop_oneof![
            (-240i32..240).prop_map(|v| v as f64 * 0.125),
            -60.0f64..60.0,
        ]
    }

    proptest! {
        #[test]
        fn prop_cursor_matches_linear(
            timestamps in sorted_timestamps(),
            queries in prop::collection::vec((query(), -12.0f64..12.0), 1..60),
        ) {
            let data = samples(&timestamps);
            let mut cursor = SeriesCursor::new();
            for (playback, offset) in queries {
                let target = playback + offset;
                prop_assert_eq!(cursor.nearest(&data, target), nearest_linear(&data, target));
            }
        }

        #[test]
        fn prop_cursor_matches_linear_on_playback_runs(
            timestamps in sorted_timestamps(),
            start in -55.0f64..55.0,
            step in 0.0f64..0.5,
            seeks in prop::collection::vec((0usize..40, -55.0f64..55.0), 0..4),
        ) {
            let data = samples(&timestamps);
            let mut cursor = SeriesCursor::new();
            let mut position = start;
            for tick in 0..40usize {
                if let Some(&(_, to)) = seeks.iter().find(|(at, _)| *at == tick) {
                    position = to;
                }
                prop_assert_eq!(cursor.nearest(&data, position), nearest_linear(&data, position));
                position += step;
            }
        }
    }
}
