//! Calendar event data structures.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A calendar event materialized from one feed row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarEvent {
    /// `evt-<row-index>`, stable within one fetch
    pub id: String,

    /// Parsed date (and time, when the cell carried one)
    pub date: NaiveDateTime,

    /// Title, or the untitled placeholder
    pub title: String,

    /// Description (empty when the feed has no description column)
    pub description: String,

    /// Location, absent when the feed has no location column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Display time taken from the raw date text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Every header mapped to this row's cell
    pub raw: RawRecord,
}

impl CalendarEvent {
    /// Calendar day the event falls on.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    /// Case-insensitive match of `term` against title or description.
    ///
    /// An empty term matches every event.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }

    /// Location, treating an empty cell as absent.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.is_empty())
    }

    /// Format event for display using a template.
    ///
    /// Supported placeholders:
    /// - `{id}`, `{date}`, `{time}`, `{title}`, `{description}`, `{location}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{id}", &self.id)
            .replace("{date}", &self.day().format("%Y-%m-%d").to_string())
            .replace("{time}", self.time.as_deref().unwrap_or(""))
            .replace("{title}", &self.title)
            .replace("{description}", &self.description)
            .replace("{location}", self.location().unwrap_or(""))
    }
}

/// The original row, keyed by header name in header order.
///
/// Repeated header names keep their first position and the last value seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    entries: Vec<(String, String)>,
}

impl RawRecord {
    /// Pair each header with the cell at the same position.
    ///
    /// Cells missing from a short row map to the empty string; surplus cells
    /// beyond the header are dropped.
    pub fn from_row(headers: &[String], cells: &[String]) -> Self {
        let mut record = Self::default();
        for (idx, header) in headers.iter().enumerate() {
            let value = cells.get(idx).cloned().unwrap_or_default();
            record.insert(header.clone(), value);
        }
        record
    }

    /// Insert or overwrite a value, keeping the key's original position.
    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Structured text dump for inspection.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for RawRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RawRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawRecordVisitor;

        impl<'de> Visitor<'de> for RawRecordVisitor {
            type Value = RawRecord;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of header names to cell strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RawRecord, A::Error> {
                let mut record = RawRecord::default();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    record.insert(key, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RawRecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_event() -> CalendarEvent {
        let headers = strings(&["Date", "Title", "Notes"]);
        let cells = strings(&["2024-03-10 14:00", "Board Meeting", "Quarterly review"]);
        CalendarEvent {
            id: "evt-1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
            title: "Board Meeting".to_string(),
            description: "Quarterly review".to_string(),
            location: None,
            time: Some("14:00".to_string()),
            raw: RawRecord::from_row(&headers, &cells),
        }
    }

    #[test]
    fn test_raw_record_pads_short_rows() {
        let headers = strings(&["Date", "Title", "Venue"]);
        let record = RawRecord::from_row(&headers, &strings(&["2024-01-01", "New Year"]));
        assert_eq!(record.len(), 3);
        assert_eq!(record.get("Venue"), Some(""));
        assert_eq!(record.get("Title"), Some("New Year"));
    }

    #[test]
    fn test_raw_record_ignores_surplus_cells() {
        let headers = strings(&["Date", "Title"]);
        let record = RawRecord::from_row(&headers, &strings(&["2024-01-01", "A", "extra"]));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_raw_record_duplicate_headers_keep_last_value() {
        let headers = strings(&["Date", "Note", "Note"]);
        let record = RawRecord::from_row(&headers, &strings(&["2024-01-01", "first", "second"]));
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("Note"), Some("second"));
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Date", "Note"]);
    }

    #[test]
    fn test_raw_record_dump_keeps_header_order() {
        let headers = strings(&["Zeta", "Alpha"]);
        let record = RawRecord::from_row(&headers, &strings(&["1", "2"]));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Zeta":"1","Alpha":"2"}"#);
    }

    #[test]
    fn test_event_serde_preserves_raw() {
        let event = sample_event();
        let json = serde_json::to_string(&event).unwrap();
        let back: CalendarEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_matches_title_or_description() {
        let event = sample_event();
        assert!(event.matches(""));
        assert!(event.matches("board"));
        assert!(event.matches("QUARTERLY"));
        assert!(!event.matches("picnic"));
    }

    #[test]
    fn test_format() {
        let event = sample_event();
        assert_eq!(
            event.format("{date} {time} {title}"),
            "2024-03-10 14:00 Board Meeting"
        );
    }
}
