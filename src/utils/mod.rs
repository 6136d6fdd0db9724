//! Utility functions and helpers.

pub mod console;
pub mod http;

use chrono::NaiveDate;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{AppError, Result};

/// Shorten `text` to at most `width` graphemes, marking the cut with `…`.
pub fn truncate_graphemes(text: &str, width: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = graphemes[..width - 1].concat();
    out.push('…');
    out
}

/// Parse a `YYYY-MM` month argument into the first day of that month.
pub fn parse_month(value: &str) -> Result<NaiveDate> {
    let (year, month) = value
        .split_once('-')
        .ok_or_else(|| AppError::validation("Invalid month format. Use YYYY-MM (e.g., 2025-01)"))?;
    let year: i32 = year
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid year: {year}")))?;
    let month: u32 = month
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid month: {month}")))?;
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation(format!("Invalid month: {month}")))
}
