//! Exporter implementations
//!
//! Contains CsvExporter, JsonExporter, and LogExporter.

mod csv;
mod json;
mod log;

pub use self::csv::{CsvExporter, CSV_FILE_NAME, CSV_HEADER};
pub use self::json::{JsonExporter, JSON_FILE_NAME};
pub use self::log::LogExporter;

use std::path::Path;

/// Round to `places` decimal places
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Create the output directory, mapping failure to a creation error
pub(crate) fn ensure_dir(name: &str, dir: &Path) -> Result<(), crate::ExportError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        crate::ExportError::exporter_creation(name, format!("{}: {e}", dir.display()))
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(4321.6, 0), 4322.0);
        assert_eq!(round_to(-0.04, 1), -0.0);
    }
}
