//! Metadata sidecar parser
//!
//! Lines look like `"Sample Rate","50.000Hz",` (trailing comma optional).

use contracts::{SessionMetadata, DEFAULT_SAMPLE_RATE_HZ};
use tracing::{instrument, trace};

use crate::column::parse_leading_f64;

/// Split a `"key","value"` line; anything else is `None`
fn key_value(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    let line = line.strip_suffix(',').unwrap_or(line).trim_end();
    let inner = line.strip_prefix('"')?.strip_suffix('"')?;
    let (key, value) = inner.split_once("\",\"")?;

    if key.is_empty() || key.contains('"') || value.contains('"') {
        return None;
    }
    Some((key, value))
}

/// Number with an optional unit suffix (`50.000Hz`, `312.5s`)
fn with_unit(value: &str, unit: &str, default: f64) -> f64 {
    let value = value.trim();
    let number = value.strip_suffix(unit).unwrap_or(value);
    parse_leading_f64(number)
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Parse the metadata sidecar
///
/// Never fails: unmatched lines are ignored and absent fields keep their
/// defaults (empty text, 50 Hz, 0 s). Unknown keys land in `extra`.
#[instrument(name = "metadata_parse", skip(text), fields(bytes = text.len()))]
pub fn parse_metadata(text: &str) -> SessionMetadata {
    let mut metadata = SessionMetadata::default();

    for line in text.lines() {
        let Some((key, value)) = key_value(line) else {
            if !line.trim().is_empty() {
                trace!(line, "metadata line ignored");
            }
            continue;
        };

        match key {
            "Format" => metadata.format = value.to_string(),
            "Venue" => metadata.venue = value.to_string(),
            "Vehicle" => metadata.vehicle = value.to_string(),
            "Driver" => metadata.driver = value.to_string(),
            "Log Date" => metadata.log_date = value.to_string(),
            "Log Time" => metadata.log_time = value.to_string(),
            "Range" => metadata.lap_range = value.to_string(),
            "Sample Rate" => metadata.sample_rate = with_unit(value, "Hz", DEFAULT_SAMPLE_RATE_HZ),
            "Duration" => metadata.duration = with_unit(value, "s", 0.0),
            _ => {
                metadata.extra.insert(key.to_string(), value.to_string());
            }
        }
    }

    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIDECAR: &str = r#""Format","MoTeC CSV File",
"Venue","Spa-Francorchamps",
"Vehicle","GT3 Cup",
"Driver","A. Driver",
"Log Date","14/06/2024",
"Log Time","10:42:07",
"Sample Rate","50.000Hz",
"Duration","142.380s",
"Range","Lap 3",
"Comment","",
"#;

    #[test]
    fn test_parse_full_sidecar() {
        let m = parse_metadata(SIDECAR);
        assert_eq!(m.format, "MoTeC CSV File");
        assert_eq!(m.venue, "Spa-Francorchamps");
        assert_eq!(m.vehicle, "GT3 Cup");
        assert_eq!(m.driver, "A. Driver");
        assert_eq!(m.log_date, "14/06/2024");
        assert_eq!(m.log_time, "10:42:07");
        assert_eq!(m.sample_rate, 50.0);
        assert!((m.duration - 142.38).abs() < 1e-9);
        assert_eq!(m.lap_range, "Lap 3");
        assert_eq!(m.extra.get("Comment").map(String::as_str), Some(""));
    }

    #[test]
    fn test_sample_rate_default() {
        let m = parse_metadata("\"Venue\",\"Spa\"\n");
        assert_eq!(m.sample_rate, 50.0);
        assert_eq!(m.duration, 0.0);
        assert_eq!(m.driver, "");

        let bad = parse_metadata("\"Sample Rate\",\"fast\"\n");
        assert_eq!(bad.sample_rate, 50.0);
    }

    #[test]
    fn test_non_matching_lines_ignored() {
        let text = "garbage\n\"Venue\"\n\"Venue\",\"Spa\",\"extra\"\n\"\",\"x\"\nVenue,Monza\n\"Driver\",\"B\"\n";
        let m = parse_metadata(text);
        assert_eq!(m.venue, "");
        assert_eq!(m.driver, "B");
        assert!(m.extra.is_empty());
    }

    #[test]
    fn test_key_value_trailing_comma_and_crlf() {
        assert_eq!(key_value("\"Range\",\"Lap 1\",\r"), Some(("Range", "Lap 1")));
        assert_eq!(key_value("  \"Range\",\"\"  "), Some(("Range", "")));
        assert_eq!(key_value("\"Range\",\"Lap 1\",,"), None);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(parse_metadata(""), SessionMetadata::default());
    }
}
