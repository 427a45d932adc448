//! Column resolution and lenient numeric cells

/// Column aliases for one field, in priority order
pub type Aliases = &'static [&'static str];

/// Find the column for a field
///
/// Tries each alias in priority order; the first header cell whose lowercased
/// text contains the alias wins. A short alias can claim an unrelated column
/// (`t` matches `throttle`) when no longer alias matched first.
pub fn resolve_column(headers: &[String], aliases: Aliases) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        headers
            .iter()
            .position(|header| header.to_lowercase().contains(alias))
    })
}

/// Split a row, trimming whitespace and surrounding quotes
pub fn split_cells(line: &str, strip_quotes: bool) -> Vec<String> {
    line.split(',')
        .map(|cell| {
            let cell = cell.trim();
            if strip_quotes {
                cell.trim_matches('"').trim().to_string()
            } else {
                cell.to_string()
            }
        })
        .collect()
}

/// Parse the leading float of a cell (`"12.5km"` -> 12.5)
///
/// Returns `None` when the cell does not start with a number.
pub fn parse_leading_f64(cell: &str) -> Option<f64> {
    let s = cell.trim();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Parse the leading integer of a cell (`"3.0"` -> 3)
pub fn parse_leading_int(cell: &str) -> Option<i32> {
    let s = cell.trim();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    s[..end].parse().ok()
}

/// Optional float cell; missing column or unparsable text reads as 0
#[inline]
pub fn optional_f64(cells: &[String], column: Option<usize>) -> f64 {
    column
        .and_then(|idx| cells.get(idx))
        .and_then(|cell| parse_leading_f64(cell))
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Optional integer cell; missing column or unparsable text reads as 0
#[inline]
pub fn optional_int(cells: &[String], column: Option<usize>) -> i32 {
    column
        .and_then(|idx| cells.get(idx))
        .and_then(|cell| parse_leading_int(cell))
        .unwrap_or(0)
}

/// Required timestamp cell; must be present and finite
#[inline]
pub fn timestamp_cell(cells: &[String], column: usize) -> Option<f64> {
    cells
        .get(column)
        .and_then(|cell| parse_leading_f64(cell))
        .filter(|v| v.is_finite())
}
