// src/error.rs

//! Unified error handling for the calendar application.

use std::fmt;

use thiserror::Error;

/// Result type alias for calendar operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Feed could not be fetched
    #[error("Feed error: {0}")]
    Fetch(#[from] FetchFailure),

    /// Lookup by identifier failed
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

/// Why a feed fetch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The server answered with a non-success status
    Http,
    /// The request never completed (DNS, connect, TLS, body read, timeout)
    Transport,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::Http => "http",
            FailureReason::Transport => "transport",
        }
    }
}

/// Feed-level failure surfaced to the caller.
///
/// Row-level problems never produce one of these; they are skipped during
/// materialization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: {}", .reason.as_str(), .detail)]
pub struct FetchFailure {
    pub reason: FailureReason,
    pub detail: String,
}

impl FetchFailure {
    pub fn new(reason: FailureReason, detail: impl fmt::Display) -> Self {
        Self {
            reason,
            detail: detail.to_string(),
        }
    }

    pub fn http(status_text: impl fmt::Display) -> Self {
        Self::new(FailureReason::Http, status_text)
    }

    pub fn transport(message: impl fmt::Display) -> Self {
        Self::new(FailureReason::Transport, message)
    }
}
