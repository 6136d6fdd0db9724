// src/lib.rs

//! sheetcal: spreadsheet-backed calendar library
//!
//! Fetches a published spreadsheet's CSV export, infers which columns hold
//! the date, title, description and location, and materializes the rows
//! into date-sorted calendar events.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
