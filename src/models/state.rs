//! Application state for the calendar views.
//!
//! All mutation goes through the transition methods; the derived views are
//! pure reads over the current state.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::FetchFailure;
use crate::models::CalendarEvent;

/// Which view the presentation layer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    Calendar,
    #[default]
    List,
}

/// Generation token handed out by [`AppState::begin_load`].
///
/// Only the most recent ticket may commit a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Shared UI state.
#[derive(Debug, Clone)]
pub struct AppState {
    events: Vec<CalendarEvent>,
    loading: bool,
    error: Option<String>,
    /// Always the first day of the displayed month
    current_month: NaiveDate,
    selected: Option<String>,
    view_mode: ViewMode,
    search_term: String,
    generation: u64,
    failure_message: String,
}

impl AppState {
    /// Create an empty state showing the month containing `today`.
    pub fn new(today: NaiveDate, failure_message: impl Into<String>) -> Self {
        Self {
            events: Vec::new(),
            loading: false,
            error: None,
            current_month: first_of_month(today),
            selected: None,
            view_mode: ViewMode::default(),
            search_term: String::new(),
            generation: 0,
            failure_message: failure_message.into(),
        }
    }

    // --- Transitions ---

    /// Mark a fetch as in flight and clear any previous error.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        LoadTicket(self.generation)
    }

    /// Replace the event list wholesale.
    ///
    /// Returns `false` and changes nothing when a newer load has started.
    pub fn load_succeeded(&mut self, ticket: LoadTicket, events: Vec<CalendarEvent>) -> bool {
        if !self.is_current(ticket) {
            log::debug!("Discarding stale load result (ticket {})", ticket.0);
            return false;
        }
        self.events = events;
        self.loading = false;
        let still_loaded = self
            .selected
            .as_ref()
            .is_none_or(|id| self.events.iter().any(|e| &e.id == id));
        if !still_loaded {
            self.selected = None;
        }
        true
    }

    /// Record a failed fetch. Previously loaded events stay visible.
    ///
    /// Every cause shows the same configured message; the detail is logged.
    pub fn load_failed(&mut self, ticket: LoadTicket, failure: &FetchFailure) -> bool {
        if !self.is_current(ticket) {
            log::debug!("Discarding stale load failure (ticket {})", ticket.0);
            return false;
        }
        log::error!("Feed sync failed: {}", failure);
        self.error = Some(self.failure_message.clone());
        self.loading = false;
        true
    }

    /// Move the displayed month forward (positive) or back (negative).
    pub fn month_changed(&mut self, delta: i32) {
        let months = Months::new(delta.unsigned_abs());
        let moved = if delta >= 0 {
            self.current_month.checked_add_months(months)
        } else {
            self.current_month.checked_sub_months(months)
        };
        if let Some(month) = moved {
            self.current_month = month;
        }
    }

    pub fn jump_to_today(&mut self, today: NaiveDate) {
        self.current_month = first_of_month(today);
    }

    /// Show a specific month. Returns `false` for an invalid month.
    pub fn set_month(&mut self, year: i32, month: u32) -> bool {
        match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(date) => {
                self.current_month = date;
                true
            }
            None => false,
        }
    }

    /// Select an event by id. Returns `false` if no such event is loaded.
    pub fn event_selected(&mut self, id: &str) -> bool {
        if self.events.iter().any(|e| e.id == id) {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn search_changed(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn view_mode_changed(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    // --- Accessors ---

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_month(&self) -> NaiveDate {
        self.current_month
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    // --- Derived views ---

    /// Events whose title or description contains the search term.
    pub fn filtered_events(&self) -> Vec<&CalendarEvent> {
        self.events
            .iter()
            .filter(|e| e.matches(&self.search_term))
            .collect()
    }

    /// Filtered events inside the displayed month.
    pub fn month_events(&self) -> Vec<&CalendarEvent> {
        let month = self.current_month;
        self.filtered_events()
            .into_iter()
            .filter(|e| e.date.year() == month.year() && e.date.month() == month.month())
            .collect()
    }

    /// Every date of the displayed month, in order.
    pub fn days_in_month(&self) -> Vec<NaiveDate> {
        let month = self.current_month.month();
        self.current_month
            .iter_days()
            .take_while(|d| d.month() == month)
            .collect()
    }

    /// Filtered events falling on `day`.
    pub fn events_on_day(&self, day: NaiveDate) -> Vec<&CalendarEvent> {
        self.filtered_events()
            .into_iter()
            .filter(|e| e.day() == day)
            .collect()
    }

    pub fn selected_event(&self) -> Option<&CalendarEvent> {
        let id = self.selected.as_deref()?;
        self.events.iter().find(|e| e.id == id)
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
