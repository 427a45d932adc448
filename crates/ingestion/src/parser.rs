//! Log parser entry point

use contracts::{LogDialect, ParseReport, ParserConfig, TelemetrySeries};
use tracing::{debug, instrument};

use crate::error::{IngestionError, Result};
use crate::generic::parse_generic;
use crate::probe::probe;
use crate::vendor::parse_vendor;

/// Parsed telemetry and its row accounting
#[derive(Debug, Clone)]
pub struct ParsedLog {
    pub series: TelemetrySeries,
    pub report: ParseReport,
}

/// Telemetry log parser
///
/// Probes the dialect, resolves columns, reads rows, then stable-sorts the
/// samples by timestamp.
#[derive(Debug, Clone, Default)]
pub struct LogParser {
    config: ParserConfig,
}

impl LogParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse raw log text
    ///
    /// # Errors
    /// `Format` when every line is blank or no timestamp column exists.
    /// A header without data rows yields an empty series.
    #[instrument(name = "log_parser_parse", skip(self, text), fields(bytes = text.len()))]
    pub fn parse(&self, text: &str) -> Result<ParsedLog> {
        let lines: Vec<&str> = text.lines().collect();

        let probe = probe(&lines, self.config.dialect, self.config.header_scan_lines)
            .ok_or_else(|| IngestionError::format("input is empty"))?;

        debug!(
            dialect = %probe.dialect,
            header_line = ?probe.header_line,
            "dialect selected"
        );

        let (samples, report) = match (probe.dialect, probe.header_line) {
            (LogDialect::Generic, Some(header_line)) => parse_generic(&lines, header_line)?,
            (LogDialect::Generic, None) => {
                return Err(IngestionError::format("generic log has no header line"))
            }
            (LogDialect::Vendor, header_line) => {
                parse_vendor(&lines, header_line, self.config.vendor_skip_rows)?
            }
        };

        if report.rows_skipped > 0 {
            debug!(
                rows_skipped = report.rows_skipped,
                rows_seen = report.rows_seen,
                "malformed rows excluded"
            );
        }
        observability::metrics::record_parse_report(&report);

        Ok(ParsedLog {
            series: TelemetrySeries::from_samples(samples),
            report,
        })
    }
}

/// Parse with default settings
pub fn parse(text: &str) -> Result<ParsedLog> {
    LogParser::default().parse(text)
}
