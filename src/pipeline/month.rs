// src/pipeline/month.rs

//! Month grid view.

use chrono::{Datelike, NaiveDate};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::Result;
use crate::models::{AppState, Config, ViewMode};
use crate::pipeline::sync::run_sync;
use crate::utils::{console, truncate_graphemes};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Fetch the feed and print one month as a Sun..Sat grid.
pub async fn run_month(
    config: &Config,
    today: NaiveDate,
    month: Option<NaiveDate>,
    search: Option<String>,
) -> Result<()> {
    let mut state = run_sync(config, today).await?;
    state.view_mode_changed(ViewMode::Calendar);
    if let Some(month) = month {
        state.set_month(month.year(), month.month());
    }
    if let Some(term) = search {
        state.search_changed(term);
    }

    console::header(&state.current_month().format("%B %Y").to_string());
    console::lines(&render_month(&state, config.display.max_title_width, today));
    console::summary(
        "Month",
        &[("Events this month", state.month_events().len().to_string())],
    );
    Ok(())
}

/// Render the displayed month of `state` as text rows.
///
/// Each cell is `width` graphemes wide; today's date is marked with `*`.
pub fn render_month(state: &AppState, width: usize, today: NaiveDate) -> Vec<String> {
    let width = width.max(3);
    let mut out = vec![render_row(WEEKDAYS.iter().map(|d| d.to_string()), width)];

    let days = state.days_in_month();
    let Some(first) = days.first() else {
        return out;
    };

    // Leading blanks before the 1st, then every day of the month.
    let lead = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
    cells.extend(days.iter().copied().map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    for week in cells.chunks(7) {
        out.push(render_row(
            week.iter().map(|day| match day {
                Some(d) if *d == today => format!("{:>2}*", d.day()),
                Some(d) => format!("{:>2}", d.day()),
                None => String::new(),
            }),
            width,
        ));

        let titles: Vec<Vec<String>> = week
            .iter()
            .map(|day| match day {
                Some(d) => state
                    .events_on_day(*d)
                    .iter()
                    .map(|e| truncate_graphemes(&e.title, width))
                    .collect(),
                None => Vec::new(),
            })
            .collect();

        let depth = titles.iter().map(Vec::len).max().unwrap_or(0);
        for slot in 0..depth {
            out.push(render_row(
                titles
                    .iter()
                    .map(|t| t.get(slot).cloned().unwrap_or_default()),
                width,
            ));
        }
    }
    out
}

fn render_row(cells: impl Iterator<Item = String>, width: usize) -> String {
    let row: Vec<String> = cells.map(|c| pad(&c, width)).collect();
    row.join("|").trim_end().to_string()
}

/// Right-pad to `width` graphemes.
fn pad(text: &str, width: usize) -> String {
    let len = text.graphemes(true).count();
    let mut out = text.to_string();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::parse_feed_default;

    fn state_for(feed: &str, today: NaiveDate) -> AppState {
        let mut state = AppState::new(today, "failed");
        let ticket = state.begin_load();
        state.load_succeeded(ticket, parse_feed_default(feed));
        state
    }

    #[test]
    fn test_grid_shape() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        let state = state_for("Date,Title\n", today);
        let rows = render_month(&state, 4, today);

        // February 2024 starts on a Thursday and spans five weeks.
        assert_eq!(rows.len(), 1 + 5);
        assert_eq!(rows[0], "Sun |Mon |Tue |Wed |Thu |Fri |Sat");
        assert_eq!(rows[1], "    |    |    |    | 1  | 2  | 3");
        assert!(rows[3].contains("14*"));
    }

    #[test]
    fn test_events_listed_under_their_day() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let state = state_for(
            "Date,Title\n2024-03-10,Quarterly Review\n2024-03-10,Lunch\n2024-04-01,Later\n",
            today,
        );
        let rows = render_month(&state, 6, today);
        let joined = rows.join("\n");

        assert!(joined.contains("Quart…"));
        assert!(joined.contains("Lunch"));
        assert!(!joined.contains("Later"));
    }

    #[test]
    fn test_search_hides_events() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut state = state_for("Date,Title\n2024-03-10,Review\n2024-03-10,Lunch\n", today);
        state.search_changed("lunch");

        let joined = render_month(&state, 8, today).join("\n");
        assert!(joined.contains("Lunch"));
        assert!(!joined.contains("Review"));
    }

    #[test]
    fn test_pad_counts_graphemes() {
        assert_eq!(pad("é", 3), "é  ");
        assert_eq!(pad("long", 2), "long");
    }
}
