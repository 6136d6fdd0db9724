// src/services/dates.rs

//! Date parsing and display-time extraction for feed cells.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};

/// Date-time layouts tried in order after RFC 3339.
const DATE_TIME_FORMATS: &[&str] = &[
    // ISO-like
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I:%M %p",
    // Slash, US order (spreadsheet export default). `%y` only matches two
    // digits, so these never shadow the four-digit layouts below.
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    // Month names; `%B` parses both full and abbreviated names
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%B %d, %Y %I:%M %p",
    "%B %d %Y %H:%M",
    "%d %B %Y %H:%M",
];

/// Date-only layouts; the result is midnight.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%a %B %d %Y",
    "%A, %B %d, %Y",
];

/// Years below this come from `%Y` reading a short year (`3/10/24` as 0024).
const MIN_FULL_YEAR: i32 = 1000;

/// Parse a trimmed date cell.
///
/// Accepts the common layouts a spreadsheet export produces; `None` for
/// anything else, including calendar-invalid dates such as `2024-13-45`.
///
/// Offset-bearing input is converted to the local time zone, so events keep
/// their absolute order. Everything else is taken as local wall-clock time.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| {
            NaiveDateTime::parse_from_str(text, fmt)
                .ok()
                .filter(has_full_year)
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| {
                    NaiveDate::parse_from_str(text, fmt)
                        .ok()
                        .filter(has_full_year)
                })
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn has_full_year<D: Datelike>(date: &D) -> bool {
    date.year() >= MIN_FULL_YEAR
}

/// Best-effort display time taken from the raw date text.
///
/// When the text contains `:`, the second whitespace-separated token is
/// returned as-is. This looks only at the text's shape, never at the parsed
/// value, and misfires for layouts where the time is not the second token.
pub fn extract_time(raw: &str) -> Option<String> {
    if !raw.contains(':') {
        return None;
    }
    raw.split_whitespace().nth(1).map(str::to_string)
}
