//! SessionMetadata - Metadata parser output

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sample rate assumed when the sidecar does not declare one (Hz)
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 50.0;

/// Descriptive session record from the metadata sidecar
///
/// Informational only; it never influences sync or lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Log format tag (e.g. "MoTeC CSV File")
    pub format: String,

    pub venue: String,

    pub vehicle: String,

    pub driver: String,

    pub log_date: String,

    pub log_time: String,

    /// Declared sample rate (Hz)
    pub sample_rate: f64,

    /// Declared duration (seconds)
    pub duration: f64,

    /// Lap range label
    pub lap_range: String,

    /// Keys the parser does not map to a field
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Default for SessionMetadata {
    fn default() -> Self {
        Self {
            format: String::new(),
            venue: String::new(),
            vehicle: String::new(),
            driver: String::new(),
            log_date: String::new(),
            log_time: String::new(),
            sample_rate: DEFAULT_SAMPLE_RATE_HZ,
            duration: 0.0,
            lap_range: String::new(),
            extra: BTreeMap::new(),
        }
    }
}

impl SessionMetadata {
    /// One-line session title: "venue - vehicle - driver (range)"
    pub fn title(&self) -> String {
        let parts: Vec<&str> = [&self.venue, &self.vehicle, &self.driver]
            .into_iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();

        let mut title = parts.join(" - ");
        if !self.lap_range.is_empty() {
            if !title.is_empty() {
                title.push(' ');
            }
            title.push_str(&format!("({})", self.lap_range));
        }
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sample_rate() {
        let meta = SessionMetadata::default();
        assert_eq!(meta.sample_rate, 50.0);
        assert_eq!(meta.duration, 0.0);
        assert!(meta.venue.is_empty());
    }

    #[test]
    fn test_title() {
        let meta = SessionMetadata {
            venue: "Brands Hatch".into(),
            vehicle: "Radical SR3".into(),
            driver: "J. Smith".into(),
            lap_range: "Lap 2".into(),
            ..Default::default()
        };
        assert_eq!(meta.title(), "Brands Hatch - Radical SR3 - J. Smith (Lap 2)");
        assert_eq!(SessionMetadata::default().title(), "");
    }
}
