//! Generic dialect: one comma-separated header, free column naming

use contracts::{LogDialect, ParseReport, TelemetrySample};

use crate::column::{
    optional_f64, optional_int, resolve_column, split_cells, timestamp_cell, Aliases,
};
use crate::error::{IngestionError, Result};

const TIMESTAMP: Aliases = &["timestamp", "time", "t"];
const SPEED: Aliases = &["speed", "velocity", "mph", "kph"];
const RPM: Aliases = &["rpm", "engine_rpm", "revs"];
const GEAR: Aliases = &["gear", "transmission"];
const THROTTLE: Aliases = &["throttle", "tps", "accel"];
const BRAKE: Aliases = &["brake", "brakes", "brake_pressure"];
const DISTANCE: Aliases = &["distance", "dist", "odometer"];

#[derive(Debug)]
struct Columns {
    timestamp: usize,
    distance: Option<usize>,
    speed: Option<usize>,
    rpm: Option<usize>,
    gear: Option<usize>,
    throttle: Option<usize>,
    brake: Option<usize>,
}

impl Columns {
    fn resolve(headers: &[String]) -> Result<Self> {
        let timestamp = resolve_column(headers, TIMESTAMP).ok_or_else(|| {
            IngestionError::format(format!(
                "no timestamp column in header [{}]",
                headers.join(", ")
            ))
        })?;

        Ok(Self {
            timestamp,
            distance: resolve_column(headers, DISTANCE),
            speed: resolve_column(headers, SPEED),
            rpm: resolve_column(headers, RPM),
            gear: resolve_column(headers, GEAR),
            throttle: resolve_column(headers, THROTTLE),
            brake: resolve_column(headers, BRAKE),
        })
    }
}

/// Parse generic rows following `header_line`
///
/// Speed is taken as-is. Rows shorter than the header or without a numeric
/// timestamp are skipped.
pub(crate) fn parse_generic(
    lines: &[&str],
    header_line: usize,
) -> Result<(Vec<TelemetrySample>, ParseReport)> {
    let headers = split_cells(lines[header_line], false);
    let columns = Columns::resolve(&headers)?;
    let mut report = ParseReport::new(LogDialect::Generic, Some(header_line));
    let mut samples = Vec::with_capacity(lines.len().saturating_sub(header_line + 1));

    for line in &lines[header_line + 1..] {
        if line.trim().is_empty() {
            continue;
        }

        let cells = split_cells(line, false);
        if cells.len() < headers.len() {
            report.skip();
            continue;
        }

        let Some(timestamp) = timestamp_cell(&cells, columns.timestamp) else {
            report.skip();
            continue;
        };

        samples.push(TelemetrySample {
            timestamp,
            distance: optional_f64(&cells, columns.distance),
            speed: optional_f64(&cells, columns.speed),
            rpm: optional_f64(&cells, columns.rpm),
            gear: optional_int(&cells, columns.gear),
            throttle: optional_f64(&cells, columns.throttle),
            brake: optional_f64(&cells, columns.brake),
        });
        report.accept();
    }

    Ok((samples, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Result<(Vec<TelemetrySample>, ParseReport)> {
        let lines: Vec<&str> = text.lines().collect();
        parse_generic(&lines, 0)
    }

    #[test]
    fn test_generic_columns_any_order() {
        let (samples, report) = run("Gear,RPM,Speed_mph,Timestamp,Throttle,Brake\n3,4500,61.2,1.5,80,0\n").unwrap();
        assert_eq!(report.rows_accepted, 1);
        let s = samples[0];
        assert_eq!(s.timestamp, 1.5);
        assert_eq!(s.speed, 61.2);
        assert_eq!(s.rpm, 4500.0);
        assert_eq!(s.gear, 3);
        assert_eq!(s.throttle, 80.0);
        assert_eq!(s.brake, 0.0);
        assert_eq!(s.distance, 0.0);
    }

    #[test]
    fn test_generic_missing_timestamp_column() {
        let err = run("speed,rpm\n1,2\n").unwrap_err();
        assert!(matches!(err, IngestionError::Format { .. }));
    }

    #[test]
    fn test_generic_skips_bad_rows() {
        let text = "timestamp,speed,rpm\n0.0,10,1000\nabc,11,1100\n0.2,12\n\n0.3,13,1300\n";
        let (samples, report) = run(text).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(report.rows_seen, 4);
        assert_eq!(report.rows_skipped, 2);
        assert_eq!(samples[1].timestamp, 0.3);
    }

    #[test]
    fn test_generic_header_only() {
        let (samples, report) = run("time,speed\n").unwrap();
        assert!(samples.is_empty());
        assert_eq!(report.rows_seen, 0);
    }

    #[test]
    fn test_generic_lenient_optional_cells() {
        let (samples, _) = run("t,speed,gear\n1.0,fast,3.0\n").unwrap();
        assert_eq!(samples[0].speed, 0.0);
        assert_eq!(samples[0].gear, 3);
    }
}
