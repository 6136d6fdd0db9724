// src/services/materializer.rs

//! Row-to-event materialization.
//!
//! Rows that cannot become an event are skipped, never reported as errors.

use std::fmt;

use crate::models::{CalendarEvent, ColumnRole, ColumnRoleMap, RawRecord};
use crate::services::dates::{extract_time, parse_date};

/// Title used when a row's title cell is blank.
pub const UNTITLED_EVENT: &str = "Untitled Event";

/// Why a row was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    /// Fewer than two cells
    TooFewCells(usize),
    /// Date cell missing or blank
    MissingDate,
    /// Date cell present but not a valid date
    InvalidDate(String),
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRejection::TooFewCells(n) => write!(f, "only {n} cell(s)"),
            RowRejection::MissingDate => write!(f, "blank date cell"),
            RowRejection::InvalidDate(text) => write!(f, "unparseable date {text:?}"),
        }
    }
}

/// Builds events from tokenized rows using one role mapping.
pub struct Materializer<'a> {
    headers: &'a [String],
    roles: ColumnRoleMap,
    placeholder: &'a str,
}

impl<'a> Materializer<'a> {
    pub fn new(headers: &'a [String], roles: ColumnRoleMap) -> Self {
        Self::with_placeholder(headers, roles, UNTITLED_EVENT)
    }

    pub fn with_placeholder(headers: &'a [String], roles: ColumnRoleMap, placeholder: &'a str) -> Self {
        Self {
            headers,
            roles,
            placeholder,
        }
    }

    /// Materialize every row and sort the result by date.
    ///
    /// `rows[0]` is line 1 of the feed (the header is line 0), which fixes the
    /// `evt-<n>` identifiers. Equal dates keep their row order.
    pub fn materialize(&self, rows: &[Vec<String>]) -> Vec<CalendarEvent> {
        let mut events = Vec::with_capacity(rows.len());
        let mut rejected = 0usize;

        for (idx, cells) in rows.iter().enumerate() {
            let row_index = idx + 1;
            match self.materialize_row(row_index, cells) {
                Ok(event) => events.push(event),
                Err(reason) => {
                    rejected += 1;
                    log::debug!("Skipping row {}: {}", row_index, reason);
                }
            }
        }

        if rejected > 0 {
            log::info!("Skipped {} of {} row(s)", rejected, rows.len());
        }

        // Stable sort keeps row order for equal timestamps.
        events.sort_by_key(|e| e.date);
        events
    }

    /// Build one event, or say why the row is unusable.
    pub fn materialize_row(
        &self,
        row_index: usize,
        cells: &[String],
    ) -> std::result::Result<CalendarEvent, RowRejection> {
        if cells.len() < 2 {
            return Err(RowRejection::TooFewCells(cells.len()));
        }

        let date_text = self
            .trimmed(ColumnRole::Date, cells)
            .filter(|s| !s.is_empty())
            .ok_or(RowRejection::MissingDate)?;

        let date =
            parse_date(date_text).ok_or_else(|| RowRejection::InvalidDate(date_text.to_string()))?;

        let title = self
            .trimmed(ColumnRole::Title, cells)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.placeholder)
            .to_string();

        let description = self
            .trimmed(ColumnRole::Description, cells)
            .unwrap_or_default()
            .to_string();

        let location = self
            .trimmed(ColumnRole::Location, cells)
            .map(str::to_string);

        Ok(CalendarEvent {
            id: format!("evt-{row_index}"),
            date,
            title,
            description,
            location,
            time: extract_time(date_text),
            raw: RawRecord::from_row(self.headers, cells),
        })
    }

    fn trimmed<'c>(&self, role: ColumnRole, cells: &'c [String]) -> Option<&'c str> {
        self.roles.cell(role, cells).map(str::trim)
    }
}

/// Materialize `rows` with the default placeholder.
pub fn materialize(
    rows: &[Vec<String>],
    roles: ColumnRoleMap,
    headers: &[String],
) -> Vec<CalendarEvent> {
    Materializer::new(headers, roles).materialize(rows)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::services::{infer_roles, tokenize};

    fn rows(lines: &[&str]) -> Vec<Vec<String>> {
        lines.iter().map(|l| tokenize(l)).collect()
    }

    fn headers(line: &str) -> Vec<String> {
        tokenize(line)
    }

    fn run(header: &str, lines: &[&str]) -> Vec<CalendarEvent> {
        let headers = headers(header);
        let roles = infer_roles(&headers);
        materialize(&rows(lines), roles, &headers)
    }

    #[test]
    fn test_sorted_by_date() {
        let events = run(
            "Date,Title",
            &["2024-03-10,Third", "2024-01-05,First", "2024-02-20,Second"],
        );
        let days: Vec<NaiveDate> = events.iter().map(|e| e.day()).collect();
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            ]
        );
        // Identifiers follow the line position, not the sorted position.
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["evt-2", "evt-3", "evt-1"]);
    }

    #[test]
    fn test_ties_keep_row_order() {
        let events = run(
            "Date,Title",
            &["2024-01-01,B", "2023-12-31,A", "2024-01-01,C", "2024-01-01,D"],
        );
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_invalid_date_row_dropped() {
        let events = run("Date,Title", &["2024-01-01,Good", "2024-13-45,Broken Date"]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Good");
    }

    #[test]
    fn test_blank_date_row_dropped() {
        let events = run("Date,Title", &[",Missing Date", "   ,Spaces Only"]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_single_cell_row_dropped() {
        let headers = headers("Date,Title");
        let roles = infer_roles(&headers);
        let m = Materializer::new(&headers, roles);
        assert_eq!(
            m.materialize_row(1, &["2024-01-01".to_string()]),
            Err(RowRejection::TooFewCells(1))
        );
    }

    #[test]
    fn test_short_row_date_column_missing() {
        // Date lives in column 2, but the row only has two cells.
        let events = run("Title,Notes,Date", &["Party,Bring snacks"]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_blank_title_uses_placeholder() {
        let events = run("Date,Title", &["2024-01-01,   "]);
        assert_eq!(events[0].title, UNTITLED_EVENT);
    }

    #[test]
    fn test_custom_placeholder() {
        let headers = headers("Date,Title");
        let roles = infer_roles(&headers);
        let m = Materializer::with_placeholder(&headers, roles, "(no title)");
        let events = m.materialize(&rows(&["2024-01-01,"]));
        assert_eq!(events[0].title, "(no title)");
    }

    #[test]
    fn test_optional_roles() {
        let events = run(
            "Date,Title,Description,Venue",
            &["2024-01-01, Launch , Big day ,  Hall A "],
        );
        let event = &events[0];
        assert_eq!(event.title, "Launch");
        assert_eq!(event.description, "Big day");
        assert_eq!(event.location.as_deref(), Some("Hall A"));

        let events = run("Date,Title", &["2024-01-01,Launch"]);
        assert_eq!(events[0].description, "");
        assert_eq!(events[0].location, None);
    }

    #[test]
    fn test_time_and_raw_fields() {
        let events = run(
            "When,What,Where",
            &[r#"2024-03-10 14:00,"Standup, daily",Room 1"#],
        );
        let event = &events[0];
        assert_eq!(event.time.as_deref(), Some("14:00"));
        assert_eq!(event.title, "Standup, daily");
        assert_eq!(event.raw.get("When"), Some("2024-03-10 14:00"));
        assert_eq!(event.raw.get("What"), Some("Standup, daily"));
        assert_eq!(event.raw.get("Where"), Some("Room 1"));
    }

    #[test]
    fn test_raw_keeps_untrimmed_cells() {
        let events = run("Date,Title", &["2024-01-01 ,  Spaced  "]);
        assert_eq!(events[0].raw.get("Title"), Some("  Spaced  "));
        assert_eq!(events[0].raw.get("Date"), Some("2024-01-01 "));
    }

    #[test]
    fn test_rejection_reasons() {
        let headers = headers("Date,Title");
        let roles = infer_roles(&headers);
        let m = Materializer::new(&headers, roles);
        let row = |s: &str| tokenize(s);

        assert_eq!(m.materialize_row(1, &row(",x")), Err(RowRejection::MissingDate));
        assert_eq!(
            m.materialize_row(1, &row("soon,x")),
            Err(RowRejection::InvalidDate("soon".to_string()))
        );
    }
}
