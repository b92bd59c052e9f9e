//! Display formatters
//!
//! All formatters are total: a missing or non-finite value renders as
//! [`NOT_AVAILABLE`].

use chrono::NaiveDate;

/// Placeholder for absent values
pub const NOT_AVAILABLE: &str = "N/A";

/// Compact currency units, smallest first
const COMPACT_UNITS: [(f64, &str); 5] = [
    (1.0, ""),
    (1_000.0, "K"),
    (1_000_000.0, "M"),
    (1_000_000_000.0, "B"),
    (1_000_000_000_000.0, "T"),
];

/// Signature shared by the value formatters
pub type ValueFormatter = fn(Option<f64>) -> String;

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn sign(value: f64) -> &'static str {
    if value < 0.0 { "-" } else { "" }
}

/// Insert `,` every three digits of an unsigned integer digit string
pub(crate) fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Full precision USD price, e.g. `$1,234.50`
pub fn format_price(value: Option<f64>) -> String {
    let Some(value) = finite(value) else {
        return NOT_AVAILABLE.to_string();
    };

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}${}.{}", sign(value), group_thousands(int_part), frac_part)
}

/// Compact USD amount for large aggregates, e.g. `$1.2M`, `$12M`, `$950`
pub fn format_currency(value: Option<f64>) -> String {
    let Some(value) = finite(value) else {
        return NOT_AVAILABLE.to_string();
    };

    format!("{}${}", sign(value), compact(value.abs()))
}

fn compact(value: f64) -> String {
    let mut unit = COMPACT_UNITS
        .iter()
        .rposition(|(divisor, _)| value >= *divisor)
        .unwrap_or(0);

    loop {
        let (divisor, suffix) = COMPACT_UNITS[unit];
        let scaled = value / divisor;
        let rounded = if unit > 0 && scaled < 10.0 {
            (scaled * 10.0).round() / 10.0
        } else {
            scaled.round()
        };

        // 999.95K is shown as 1M, not 1000K
        if rounded >= 1_000.0 && unit + 1 < COMPACT_UNITS.len() {
            unit += 1;
            continue;
        }

        return if rounded.fract() == 0.0 {
            format!("{}{suffix}", group_thousands(&format!("{rounded:.0}")))
        } else {
            format!("{rounded:.1}{suffix}")
        };
    }
}

/// Percent with two decimals; input is already in percent units
pub fn format_percent(value: Option<f64>) -> String {
    match finite(value) {
        Some(value) => format!("{value:.2}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `YYYY-MM-DD` (optionally followed by a time) as `M/D/YYYY`.
///
/// Unparseable input is returned as is.
pub fn format_date(date: &str) -> String {
    let trimmed = date.trim();
    let day = trimmed.get(..10).unwrap_or(trimmed);
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%-m/%-d/%Y").to_string(),
        Err(_) => trimmed.to_string(),
    }
}
