// src/pipeline/show.rs

//! Detail view for a single event.

use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::models::{CalendarEvent, Config};
use crate::pipeline::sync::run_sync;
use crate::utils::console;

/// Fetch the feed and print the event with the given id.
pub async fn run_show(config: &Config, today: NaiveDate, id: &str) -> Result<()> {
    let mut state = run_sync(config, today).await?;
    if !state.event_selected(id) {
        return Err(AppError::not_found(format!("event {id}")));
    }

    if let Some(event) = state.selected_event() {
        console::header(&event.title);
        console::lines(&render_detail(event)?);
    }
    state.clear_selection();
    Ok(())
}

/// Render every field of `event`, ending with the raw row as JSON.
pub fn render_detail(event: &CalendarEvent) -> Result<Vec<String>> {
    let mut out = vec![
        format!("Title:       {}", event.title),
        format!("Date:        {}", event.date.format("%A, %B %-d, %Y")),
    ];
    if let Some(time) = &event.time {
        out.push(format!("Time:        {time}"));
    }
    if let Some(location) = event.location() {
        out.push(format!("Location:    {location}"));
    }
    if !event.description.is_empty() {
        out.push(format!("Description: {}", event.description));
    }
    out.push(format!("Id:          {}", event.id));
    out.push(String::new());
    out.push("Raw data:".to_string());
    out.extend(event.raw.to_pretty_json()?.lines().map(str::to_string));
    Ok(out)
}
