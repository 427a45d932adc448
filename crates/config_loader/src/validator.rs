//! Configuration validation
//!
//! Rules:
//! - telemetry path is non-empty
//! - header_scan_lines >= 1
//! - initial offset is finite
//! - staleness threshold is finite and >= 0
//! - slider_min_s < slider_max_s
//! - nudge steps are finite and > 0
//! - json_decimation >= 1
//! - export formats are unique

use std::cmp::Ordering;
use std::collections::HashSet;

use contracts::{ContractError, OverlayConfig};

/// Validate an OverlayConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &OverlayConfig) -> Result<(), ContractError> {
    validate_sources(config)?;
    validate_parser(config)?;
    validate_sync(config)?;
    validate_export(config)?;
    Ok(())
}

fn validate_sources(config: &OverlayConfig) -> Result<(), ContractError> {
    if config.sources.telemetry.as_os_str().is_empty() {
        return Err(ContractError::config_validation(
            "sources.telemetry",
            "telemetry path cannot be empty",
        ));
    }
    Ok(())
}

fn validate_parser(config: &OverlayConfig) -> Result<(), ContractError> {
    if config.parser.header_scan_lines == 0 {
        return Err(ContractError::config_validation(
            "parser.header_scan_lines",
            "header_scan_lines must be >= 1",
        ));
    }
    Ok(())
}

/// Validate sync settings
fn validate_sync(config: &OverlayConfig) -> Result<(), ContractError> {
    let sync = &config.sync;

    if !sync.initial_offset_s.is_finite() {
        return Err(ContractError::config_validation(
            "sync.initial_offset_s",
            format!("initial_offset_s must be finite, got {}", sync.initial_offset_s),
        ));
    }

    if !sync.staleness_threshold_s.is_finite() || sync.staleness_threshold_s < 0.0 {
        return Err(ContractError::config_validation(
            "sync.staleness_threshold_s",
            format!(
                "staleness_threshold_s must be finite and >= 0, got {}",
                sync.staleness_threshold_s
            ),
        ));
    }

    // NaN bounds also fail here
    if sync.slider_min_s.partial_cmp(&sync.slider_max_s) != Some(Ordering::Less) {
        return Err(ContractError::config_validation(
            "sync.slider_min_s / sync.slider_max_s",
            format!(
                "slider_min_s ({}) must be < slider_max_s ({})",
                sync.slider_min_s, sync.slider_max_s
            ),
        ));
    }

    for (field, step) in [
        ("sync.coarse_step_s", sync.coarse_step_s),
        ("sync.fine_step_s", sync.fine_step_s),
    ] {
        if !step.is_finite() || step <= 0.0 {
            return Err(ContractError::config_validation(
                field,
                format!("step must be finite and > 0, got {step}"),
            ));
        }
    }

    Ok(())
}

/// Validate export routing
fn validate_export(config: &OverlayConfig) -> Result<(), ContractError> {
    if config.export.json_decimation == 0 {
        return Err(ContractError::config_validation(
            "export.json_decimation",
            "json_decimation must be >= 1",
        ));
    }

    let mut seen = HashSet::new();
    for (idx, format) in config.export.formats.iter().enumerate() {
        if !seen.insert(format) {
            return Err(ContractError::config_validation(
                format!("export.formats[{idx}]"),
                format!("duplicate export format '{}'", format.as_str()),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::ExportFormat;
    use std::path::PathBuf;

    fn valid_config() -> OverlayConfig {
        OverlayConfig::default()
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_telemetry_path() {
        let mut config = valid_config();
        config.sources.telemetry = PathBuf::new();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("sources.telemetry"));
    }

    #[test]
    fn test_zero_header_scan_lines() {
        let mut config = valid_config();
        config.parser.header_scan_lines = 0;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("header_scan_lines"));
    }

    #[test]
    fn test_non_finite_initial_offset() {
        let mut config = valid_config();
        config.sync.initial_offset_s = f64::NAN;
        assert!(validate(&config).is_err());

        config.sync.initial_offset_s = f64::INFINITY;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_negative_staleness_threshold() {
        let mut config = valid_config();
        config.sync.staleness_threshold_s = -0.5;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("staleness_threshold_s"));
    }

    #[test]
    fn test_zero_staleness_threshold_is_valid() {
        let mut config = valid_config();
        config.sync.staleness_threshold_s = 0.0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_inverted_slider_range() {
        let mut config = valid_config();
        config.sync.slider_min_s = 5.0;
        config.sync.slider_max_s = 5.0;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("slider_min_s"));
    }

    #[test]
    fn test_non_positive_step() {
        let mut config = valid_config();
        config.sync.fine_step_s = 0.0;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("fine_step_s"));
    }

    #[test]
    fn test_zero_decimation() {
        let mut config = valid_config();
        config.export.json_decimation = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_duplicate_format() {
        let mut config = valid_config();
        config.export.formats = vec![ExportFormat::Json, ExportFormat::Log, ExportFormat::Json];
        let err = validate(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("export.formats[2]"));
        assert!(msg.contains("duplicate"));
    }
}
