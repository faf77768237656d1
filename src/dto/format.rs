//! Display formatting for the es-AR locale.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::search::request::WIRE_DATE_FORMAT;

pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Placeholder shown for missing values.
pub const EMPTY_CELL: &str = "-";

/// Inserts `.` every three digits, e.g. `1234567` -> `1.234.567`.
pub fn group_thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

/// Formats an ARS amount: `804` -> `$804,00`, `1234.5` -> `$1.234,50`.
///
/// Half cents round away from zero.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = format!("{:.2}", rounded.abs());
    let (units, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}${},{cents}", group_digits(units))
}

/// Parses an amount produced by [`format_currency`].
pub fn parse_currency(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest).trim();
    if rest.is_empty() {
        return None;
    }

    let normalized: String = rest
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    let value: Decimal = normalized.parse().ok()?;

    Some(if negative { -value } else { value })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

pub fn format_datetime_as_date(datetime: NaiveDateTime) -> String {
    format_date(datetime.date())
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date)
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

/// Formats a date the way request bodies carry it (`YYYY-MM-DD`).
pub fn format_wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}
