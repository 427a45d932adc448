//! Configuration parsing
//!
//! Supports TOML (primary) and JSON (optional).

use std::path::Path;

use contracts::{ContractError, OverlayConfig};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (recommended)
    Toml,
    /// JSON
    Json,
}

impl ConfigFormat {
    /// Infer format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Label used in errors for configuration that did not come from a file
pub const INLINE_ORIGIN: &str = "<inline>";

/// Human-readable origin of a configuration document
pub fn origin_label(path: Option<&Path>) -> String {
    path.map_or_else(|| INLINE_ORIGIN.to_string(), |p| p.display().to_string())
}

fn parse_error(
    origin: &str,
    format: ConfigFormat,
    err: impl std::error::Error + Send + Sync + 'static,
) -> ContractError {
    let kind = match format {
        ConfigFormat::Toml => "TOML",
        ConfigFormat::Json => "JSON",
    };
    ContractError::ConfigParse {
        message: format!("{origin}: invalid {kind} overlay config: {err}"),
        source: Some(Box::new(err)),
    }
}

/// Parse TOML configuration
pub fn parse_toml(content: &str, origin: &str) -> Result<OverlayConfig, ContractError> {
    toml::from_str(content).map_err(|e| parse_error(origin, ConfigFormat::Toml, e))
}

/// Parse JSON configuration
pub fn parse_json(content: &str, origin: &str) -> Result<OverlayConfig, ContractError> {
    serde_json::from_str(content).map_err(|e| parse_error(origin, ConfigFormat::Json, e))
}

/// Parse configuration by format; `origin` names the document in errors
pub fn parse(content: &str, format: ConfigFormat, origin: &str) -> Result<OverlayConfig, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content, origin),
        ConfigFormat::Json => parse_json(content, origin),
    }
}
