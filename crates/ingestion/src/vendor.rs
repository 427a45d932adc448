//! Vendor dialect: metadata preamble, quoted header, units row, speed in m/s

use contracts::{LogDialect, ParseReport, TelemetrySample, MS_TO_MPH};

use crate::column::{
    optional_f64, optional_int, resolve_column, split_cells, timestamp_cell, Aliases,
};
use crate::error::{IngestionError, Result};
use crate::probe::VENDOR_FALLBACK_HEADER;

const TIME: Aliases = &["time"];
const DISTANCE: Aliases = &["distance"];
const RPM: Aliases = &["rpm", "engine rpm"];
const THROTTLE: Aliases = &["throttle", "tps"];
const BRAKE: Aliases = &["brake"];
const SPEED: Aliases = &["speed", "ms", "velocity"];
const GEAR: Aliases = &["gear"];

/// Rows with fewer cells are skipped
pub const MIN_VENDOR_FIELDS: usize = 6;

#[derive(Debug)]
struct Columns {
    time: usize,
    distance: Option<usize>,
    rpm: Option<usize>,
    throttle: Option<usize>,
    brake: Option<usize>,
    speed: Option<usize>,
    gear: Option<usize>,
}

impl Columns {
    fn resolve(headers: &[String]) -> Result<Self> {
        let time = resolve_column(headers, TIME).ok_or_else(|| {
            IngestionError::format(format!(
                "vendor header has no time column [{}]",
                headers.join(", ")
            ))
        })?;

        Ok(Self {
            time,
            distance: resolve_column(headers, DISTANCE),
            rpm: resolve_column(headers, RPM),
            throttle: resolve_column(headers, THROTTLE),
            brake: resolve_column(headers, BRAKE),
            speed: resolve_column(headers, SPEED),
            gear: resolve_column(headers, GEAR),
        })
    }
}

/// Parse vendor rows
///
/// With a located header, data starts `1 + skip_rows` lines below it.
/// Without one the fallback header applies and data starts at line 0.
pub(crate) fn parse_vendor(
    lines: &[&str],
    header_line: Option<usize>,
    skip_rows: usize,
) -> Result<(Vec<TelemetrySample>, ParseReport)> {
    let (headers, data_start) = match header_line {
        Some(idx) => (split_cells(lines[idx], true), idx + 1 + skip_rows),
        None => (
            VENDOR_FALLBACK_HEADER.iter().map(|h| h.to_string()).collect(),
            0,
        ),
    };
    let columns = Columns::resolve(&headers)?;
    let mut report = ParseReport::new(LogDialect::Vendor, header_line);
    let rows = lines.get(data_start..).unwrap_or_default();
    let mut samples = Vec::with_capacity(rows.len());

    for line in rows {
        if line.trim().is_empty() {
            continue;
        }

        let cells = split_cells(line, true);
        if cells.len() < MIN_VENDOR_FIELDS {
            report.skip();
            continue;
        }

        // Units row and any other text row fall out here
        let Some(timestamp) = timestamp_cell(&cells, columns.time) else {
            report.skip();
            continue;
        };

        samples.push(TelemetrySample {
            timestamp,
            distance: optional_f64(&cells, columns.distance),
            speed: optional_f64(&cells, columns.speed) * MS_TO_MPH,
            rpm: optional_f64(&cells, columns.rpm),
            gear: optional_int(&cells, columns.gear),
            throttle: optional_f64(&cells, columns.throttle),
            brake: optional_f64(&cells, columns.brake),
        });
        report.accept();
    }

    Ok((samples, report))
}
