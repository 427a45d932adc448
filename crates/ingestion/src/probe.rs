//! Dialect probe and header location

use contracts::{DialectHint, LogDialect};

use crate::column::{parse_leading_f64, split_cells};

/// Header assumed for vendor exports without a recognisable header line
pub const VENDOR_FALLBACK_HEADER: [&str; 7] = [
    "Time",
    "Distance",
    "Engine RPM",
    "Throttle Pos",
    "Brake Pos",
    "Speed_MS",
    "Gear",
];

/// Where parsing starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectProbe {
    pub dialect: LogDialect,

    /// Header line index; `None` means the vendor fallback header applies
    pub header_line: Option<usize>,
}

/// Index of the first non-blank line
pub fn first_non_blank(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|line| !line.trim().is_empty())
}

/// Scan the top of the file for a vendor header (`Time` and `RPM` tokens)
pub fn locate_vendor_header(lines: &[&str], scan_lines: usize) -> Option<usize> {
    lines
        .iter()
        .take(scan_lines)
        .position(|line| line.contains("Time") && line.contains("RPM"))
}

/// Vendor traits around a `Time`/`RPM` line: a `"key","value"` preamble
/// above it, quoted header cells, or a units row below it
///
/// A bare `Time,Speed,RPM` header on line one is a plain export and keeps
/// the generic column rules.
fn has_vendor_evidence(lines: &[&str], header_line: usize, first: usize) -> bool {
    if header_line > first || lines[header_line].trim_start().starts_with('"') {
        return true;
    }

    lines
        .iter()
        .skip(header_line + 1)
        .find(|line| !line.trim().is_empty())
        .is_some_and(|next| {
            split_cells(next, true)
                .first()
                .is_some_and(|cell| !cell.is_empty() && parse_leading_f64(cell).is_none())
        })
}

/// Headerless export: the first non-blank line already carries numbers
fn starts_with_number(line: &str) -> bool {
    split_cells(line, true)
        .first()
        .and_then(|cell| parse_leading_f64(cell))
        .is_some()
}

/// Pick a dialect for the text
///
/// Order: vendor header in the scan window backed by vendor traits, then
/// headerless numeric data (vendor with fallback header), then generic. A
/// non-auto hint skips the probe. Returns `None` when every line is blank.
pub fn probe(lines: &[&str], hint: DialectHint, scan_lines: usize) -> Option<DialectProbe> {
    let first = first_non_blank(lines)?;

    let probe = match hint {
        DialectHint::Generic => DialectProbe {
            dialect: LogDialect::Generic,
            header_line: Some(first),
        },
        DialectHint::Vendor => DialectProbe {
            dialect: LogDialect::Vendor,
            header_line: locate_vendor_header(lines, scan_lines),
        },
        DialectHint::Auto => {
            let vendor_header = locate_vendor_header(lines, scan_lines)
                .filter(|&line| has_vendor_evidence(lines, line, first));

            if let Some(header_line) = vendor_header {
                DialectProbe {
                    dialect: LogDialect::Vendor,
                    header_line: Some(header_line),
                }
            } else if starts_with_number(lines[first]) {
                DialectProbe {
                    dialect: LogDialect::Vendor,
                    header_line: None,
                }
            } else {
                DialectProbe {
                    dialect: LogDialect::Generic,
                    header_line: Some(first),
                }
            }
        }
    };

    Some(probe)
}
