use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Parses a statement number, dropping thousands separators.
pub fn parse_decimal(field: &str) -> Option<Decimal> {
    let cleaned = field.trim().replace(',', "");
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Parses `DD`, `MON`, `YYYY` parts of a statement date such as `10-OCT-2016`.
pub fn parse_statement_date(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let mut chars = month.chars();
    let month = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect::<String>(),
        None => return None,
    };

    NaiveDate::parse_from_str(&format!("{} {} {}", day, month, year), "%d %b %Y").ok()
}
