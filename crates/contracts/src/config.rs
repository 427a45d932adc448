//! OverlayConfig - Config Loader output
//!
//! Describes a complete overlay session: telemetry sources, parser tuning,
//! sync behaviour and export routing. Every section has defaults, so an empty
//! file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::SyncEngineConfig;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete session configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Telemetry and metadata sources
    #[serde(default)]
    pub sources: SourceConfig,

    /// Log parser tuning
    #[serde(default)]
    pub parser: ParserConfig,

    /// Sync engine settings
    #[serde(default)]
    pub sync: SyncEngineConfig,

    /// Export routing
    #[serde(default)]
    pub export: ExportConfig,
}

/// Source files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Telemetry log path
    #[serde(default = "default_telemetry_path")]
    pub telemetry: PathBuf,

    /// Metadata sidecar path (optional)
    #[serde(default = "default_metadata_path")]
    pub metadata: Option<PathBuf>,
}

fn default_telemetry_path() -> PathBuf {
    PathBuf::from("data/raw/teledata.csv")
}

fn default_metadata_path() -> Option<PathBuf> {
    Some(PathBuf::from("data/raw/teledata_metadata.csv"))
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            telemetry: default_telemetry_path(),
            metadata: default_metadata_path(),
        }
    }
}

/// Parser tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Force a dialect instead of probing
    #[serde(default)]
    pub dialect: DialectHint,

    /// Lines scanned for the vendor header
    #[serde(default = "default_header_scan_lines")]
    pub header_scan_lines: usize,

    /// Extra rows skipped after a located vendor header (e.g. a units row)
    #[serde(default)]
    pub vendor_skip_rows: usize,
}

fn default_header_scan_lines() -> usize {
    10
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            dialect: DialectHint::default(),
            header_scan_lines: default_header_scan_lines(),
            vendor_skip_rows: 0,
        }
    }
}

/// Dialect selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialectHint {
    /// Probe the text
    #[default]
    Auto,
    Generic,
    Vendor,
}

/// Export routing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output directory
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Enabled exporters
    #[serde(default = "default_formats")]
    pub formats: Vec<ExportFormat>,

    /// Keep every Nth sample in the JSON export
    #[serde(default = "default_json_decimation")]
    pub json_decimation: usize,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/processed")
}

fn default_formats() -> Vec<ExportFormat> {
    vec![ExportFormat::Csv, ExportFormat::Json]
}

fn default_json_decimation() -> usize {
    5
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            formats: default_formats(),
            json_decimation: default_json_decimation(),
        }
    }
}

/// Exporter type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Json,
    Log,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Log => "log",
        }
    }
}
