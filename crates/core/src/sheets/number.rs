//! Tolerant numeric parsing for spreadsheet cells.

/// Parse a locale-formatted number, never failing.
///
/// Every character other than a digit, `-`, `,` or `.` is dropped, commas
/// become decimal points, and the remainder is parsed. Anything unreadable
/// (empty, several separators, stray minus signs) yields `0.0`.
///
/// ```
/// use stockboard_core::sheets::number::parse_number;
/// assert_eq!(parse_number("12,5"), 12.5);
/// assert_eq!(parse_number("€ 1 024.50"), 1024.5);
/// assert_eq!(parse_number("n/a"), 0.0);
/// ```
pub fn parse_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '-' | ',' | '.'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse an optional cell: blank or absent cells become NaN so that
/// [`sanitize`] can turn them into `None` later.
pub fn parse_cell(raw: Option<&str>) -> f64 {
    match raw {
        Some(s) if !s.trim().is_empty() => parse_number(s),
        _ => f64::NAN,
    }
}

/// Map NaN to `None`; every other value passes through.
pub fn sanitize(val: f64) -> Option<f64> {
    if val.is_nan() {
        None
    } else {
        Some(val)
    }
}

/// Parse a price cell strictly: currency symbols and spaces are removed,
/// the decimal comma is normalized, and anything still unreadable is `None`.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !is_currency_symbol(*c) && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_currency_symbol(c: char) -> bool {
    matches!(c, '$' | '€' | '£' | '¥')
}

/// Round to two decimal places.
pub fn round2(val: f64) -> f64 {
    (val * 100.0).round() / 100.0
}
