//! Strict ISO calendar date parsing.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Wire format for every date stored in the task and schedule documents.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// chrono alone accepts single-digit months and days; the documents do not.
static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));

/// Parses a `YYYY-MM-DD` string into a calendar date.
///
/// Surrounding whitespace is ignored. Returns `None` for any other shape or
/// for dates that do not exist (`2024-02-30`).
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if !ISO_DATE_RE.is_match(trimmed) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT).ok()
}

/// Formats a date using the document wire format.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_iso_date, parse_iso_date};
    use chrono::NaiveDate;

    #[test]
    fn parse_accepts_padded_dates_and_trims() {
        let date = parse_iso_date(" 2024-03-09 ").expect("date should parse");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn parse_rejects_unpadded_and_impossible_dates() {
        assert_eq!(parse_iso_date("2024-3-9"), None);
        assert_eq!(parse_iso_date("2024-02-30"), None);
        assert_eq!(parse_iso_date("tomorrow"), None);
        assert_eq!(parse_iso_date(""), None);
    }

    #[test]
    fn format_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_iso_date(date), "2025-01-05");
    }
}
