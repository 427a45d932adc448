//! Session summary statistics

use contracts::{SessionStats, TelemetrySeries};
use observability::RunningStats;

/// Summarise a series
///
/// Distance is cumulative in the logs, so the largest value is the lap
/// length. An empty series yields all zeros.
pub fn compute_stats(series: &TelemetrySeries) -> SessionStats {
    if series.is_empty() {
        return SessionStats::default();
    }

    let mut speed = RunningStats::default();
    let mut rpm = RunningStats::default();
    let mut max_distance = f64::MIN;

    for sample in series.iter() {
        speed.push(sample.speed);
        rpm.push(sample.rpm);
        max_distance = max_distance.max(sample.distance);
    }

    let time_range = series.time_range();

    SessionStats {
        num_samples: series.len(),
        duration_s: time_range.map(|(_, end)| end).unwrap_or(0.0),
        time_range,
        total_distance_m: max_distance,
        max_speed_mph: speed.max(),
        avg_speed_mph: speed.mean(),
        max_speed_kph: speed.max() * contracts::MPH_TO_KPH,
        avg_speed_kph: speed.mean() * contracts::MPH_TO_KPH,
        max_rpm: rpm.max(),
        avg_rpm: rpm.mean(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::TelemetrySample;

    fn sample(timestamp: f64, distance: f64, speed: f64, rpm: f64) -> TelemetrySample {
        TelemetrySample {
            timestamp,
            distance,
            speed,
            rpm,
            ..TelemetrySample::default()
        }
    }

    #[test]
    fn test_compute_stats() {
        let series = TelemetrySeries::from_samples(vec![
            sample(0.5, 0.0, 50.0, 3000.0),
            sample(1.0, 10.0, 70.0, 5000.0),
            sample(1.5, 20.0, 60.0, 4000.0),
        ]);

        let stats = compute_stats(&series);
        assert_eq!(stats.num_samples, 3);
        assert_eq!(stats.duration_s, 1.5);
        assert_eq!(stats.time_range, Some((0.5, 1.5)));
        assert_eq!(stats.total_distance_m, 20.0);
        assert_eq!(stats.max_speed_mph, 70.0);
        assert!((stats.avg_speed_mph - 60.0).abs() < 1e-9);
        assert!((stats.max_speed_kph - 70.0 * 1.609_344).abs() < 1e-9);
        assert_eq!(stats.max_rpm, 5000.0);
        assert!((stats.avg_rpm - 4000.0).abs() < 1e-9);
    }

    #[test]
    fn test_compute_stats_empty() {
        let stats = compute_stats(&TelemetrySeries::empty());
        assert_eq!(stats, SessionStats::default());
        assert_eq!(stats.time_range, None);
    }
}
