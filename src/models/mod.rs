// src/models/mod.rs

//! Domain models for the calendar application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod event;
mod roles;
mod state;

// Re-export all public types
pub use config::{Config, DisplayConfig, HttpConfig, SheetConfig};
pub use event::{CalendarEvent, RawRecord};
pub use roles::{ColumnRole, ColumnRoleMap};
pub use state::{AppState, LoadTicket, ViewMode};
