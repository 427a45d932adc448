//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use contracts::{DialectHint, ExportFormat};

/// Telemetry Overlay - sync a driving telemetry log with an onboard video
#[derive(Parser, Debug)]
#[command(
    name = "telemetry-overlay",
    author,
    version,
    about = "Telemetry/video sync overlay toolkit",
    long_about = "Loads vehicle telemetry logs (generic CSV or vendor exports), \n\
                  aligns them with a video clock through an adjustable offset and \n\
                  resolves the sample to display for any playback position."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "TELEMETRY_OVERLAY_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "TELEMETRY_OVERLAY_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load, summarise and export a session
    Process(ProcessArgs),

    /// Check that the sources load and report parse diagnostics
    Validate(ValidateArgs),

    /// Display session metadata and statistics
    Info(InfoArgs),

    /// Look up the telemetry sample for one or more video times
    Resolve(ResolveArgs),

    /// Simulate video playback with live sync commands on stdin
    Play(PlayArgs),
}

/// Session source selection shared by all commands
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Path to configuration file (TOML or JSON); defaults apply when omitted
    #[arg(short, long, env = "TELEMETRY_OVERLAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the telemetry log path
    #[arg(short, long, env = "TELEMETRY_OVERLAY_TELEMETRY")]
    pub telemetry: Option<PathBuf>,

    /// Override the metadata sidecar path (empty string disables it)
    #[arg(short, long, env = "TELEMETRY_OVERLAY_METADATA")]
    pub metadata: Option<PathBuf>,

    /// Force a log dialect instead of probing
    #[arg(long, value_enum)]
    pub dialect: Option<DialectArg>,
}

/// Arguments for the `process` command
#[derive(Args, Debug, Clone)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Override the export directory
    #[arg(short, long, env = "TELEMETRY_OVERLAY_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Override the export formats (comma separated)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub formats: Vec<FormatArg>,

    /// Keep every Nth sample in the JSON export
    #[arg(long)]
    pub json_decimation: Option<usize>,

    /// Load and summarise only, write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "TELEMETRY_OVERLAY_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Include unmapped metadata keys
    #[arg(long)]
    pub extra: bool,
}

/// Arguments for the `resolve` command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Offset in seconds (telemetry = video + offset); config value when omitted
    #[arg(long, allow_hyphen_values = true)]
    pub offset: Option<f64>,

    /// Video times in seconds
    #[arg(required = true, allow_negative_numbers = true)]
    pub times: Vec<f64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `play` command
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Offset in seconds at start; config value when omitted
    #[arg(long, allow_hyphen_values = true)]
    pub offset: Option<f64>,

    /// Playback ticks per second
    #[arg(long, default_value = "30", env = "TELEMETRY_OVERLAY_FPS")]
    pub fps: f64,

    /// Video time to start from (seconds)
    #[arg(long, default_value = "0")]
    pub start: f64,

    /// Video time to stop at (seconds); end of telemetry when omitted
    #[arg(long)]
    pub end: Option<f64>,

    /// Print a status line every N seconds of video (0 = never)
    #[arg(long, default_value = "1")]
    pub report_every: f64,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "TELEMETRY_OVERLAY_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}

/// Log dialect override
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DialectArg {
    Auto,
    Generic,
    Vendor,
}

impl From<DialectArg> for DialectHint {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Auto => DialectHint::Auto,
            DialectArg::Generic => DialectHint::Generic,
            DialectArg::Vendor => DialectHint::Vendor,
        }
    }
}

/// Export format override
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    Csv,
    Json,
    Log,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Log => ExportFormat::Log,
        }
    }
}
