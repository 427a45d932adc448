//! Log dialects and parse diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Telemetry log dialect
///
/// Closed set: each variant has its own header locator and column aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogDialect {
    /// Single comma-separated header on the first line
    Generic,
    /// Vendor export: header somewhere near the top, units row, speed in m/s
    Vendor,
}

impl LogDialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogDialect::Generic => "generic",
            LogDialect::Vendor => "vendor",
        }
    }
}

impl fmt::Display for LogDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row accounting for one parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Dialect used
    pub dialect: LogDialect,

    /// Zero-based header line, `None` when a fallback header was assumed
    pub header_line: Option<usize>,

    /// Non-blank lines considered as data rows
    pub rows_seen: usize,

    /// Rows that became samples
    pub rows_accepted: usize,

    /// Rows excluded (too few fields, bad timestamp)
    pub rows_skipped: usize,
}

impl ParseReport {
    pub fn new(dialect: LogDialect, header_line: Option<usize>) -> Self {
        Self {
            dialect,
            header_line,
            rows_seen: 0,
            rows_accepted: 0,
            rows_skipped: 0,
        }
    }

    /// Count an accepted row
    #[inline]
    pub fn accept(&mut self) {
        self.rows_seen += 1;
        self.rows_accepted += 1;
    }

    /// Count a skipped row
    #[inline]
    pub fn skip(&mut self) {
        self.rows_seen += 1;
        self.rows_skipped += 1;
    }
}
