// src/pipeline/list.rs

//! List view: events grouped by day.

use chrono::{Datelike, NaiveDate};

use crate::error::Result;
use crate::models::{CalendarEvent, Config, ViewMode};
use crate::pipeline::sync::run_sync;
use crate::utils::console;

/// Fetch the feed and print the list view.
pub async fn run_list(
    config: &Config,
    today: NaiveDate,
    search: Option<String>,
    month: Option<NaiveDate>,
) -> Result<()> {
    let mut state = run_sync(config, today).await?;
    state.view_mode_changed(ViewMode::List);
    if let Some(term) = search {
        state.search_changed(term);
    }

    let events = match month {
        Some(month) => {
            state.set_month(month.year(), month.month());
            console::header(&month.format("%B %Y").to_string());
            state.month_events()
        }
        None => {
            console::header("All events");
            state.filtered_events()
        }
    };

    console::lines(&render_list(&events));
    console::summary(
        "Sync",
        &[
            ("Loaded", state.events().len().to_string()),
            ("Shown", events.len().to_string()),
        ],
    );
    Ok(())
}

/// Render events (already in date order) grouped under day headings.
pub fn render_list(events: &[&CalendarEvent]) -> Vec<String> {
    if events.is_empty() {
        return vec!["No events found.".to_string()];
    }

    let mut out = Vec::new();
    let mut current_day = None;

    for event in events {
        let day = event.day();
        if current_day != Some(day) {
            if current_day.is_some() {
                out.push(String::new());
            }
            out.push(day.format("%a, %b %-d %Y").to_string());
            current_day = Some(day);
        }

        let mut line = format!(
            "  {:<8} {}",
            event.time.as_deref().unwrap_or("all day"),
            event.title
        );
        if let Some(location) = event.location() {
            line.push_str(&format!("  @ {location}"));
        }
        line.push_str(&format!("  [{}]", event.id));
        out.push(line);

        if !event.description.is_empty() {
            out.push(format!("           {}", event.description));
        }
    }
    out
}
