//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Feed source identifiers
    #[serde(default)]
    pub sheet: SheetConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Presentation strings and sizes
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.sheet.sheet_id.trim().is_empty() {
            return Err(AppError::validation("sheet.sheet_id is empty"));
        }
        if self.sheet.gid.trim().is_empty() {
            return Err(AppError::validation("sheet.gid is empty"));
        }
        if !self.sheet.gid.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::validation("sheet.gid must be numeric"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.display.max_title_width == 0 {
            return Err(AppError::validation("display.max_title_width must be > 0"));
        }
        self.sheet.export_url()?;
        Ok(())
    }
}

/// Identifies the feed: one spreadsheet and one tab within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Spreadsheet identifier
    #[serde(default = "defaults::sheet_id")]
    pub sheet_id: String,

    /// Sub-sheet (tab) identifier
    #[serde(default = "defaults::gid")]
    pub gid: String,

    /// Scheme and host serving the export endpoint
    #[serde(default = "defaults::host")]
    pub host: String,
}

impl SheetConfig {
    /// CSV export URL for this sheet.
    ///
    /// `<host>/spreadsheets/d/<sheet_id>/export?format=csv&gid=<gid>`
    pub fn export_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.host)?;
        if url.cannot_be_a_base() {
            return Err(AppError::config(format!(
                "sheet.host is not a base URL: {}",
                self.host
            )));
        }
        url.path_segments_mut()
            .map_err(|_| AppError::config("sheet.host cannot carry a path"))?
            .pop_if_empty()
            .extend(["spreadsheets", "d", self.sheet_id.as_str(), "export"]);
        url.query_pairs_mut()
            .clear()
            .append_pair("format", "csv")
            .append_pair("gid", &self.gid);
        Ok(url)
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            sheet_id: defaults::sheet_id(),
            gid: defaults::gid(),
            host: defaults::host(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Title used when a row's title cell is blank
    #[serde(default = "defaults::untitled_placeholder")]
    pub untitled_placeholder: String,

    /// Banner shown when a sync fails, whatever the cause
    #[serde(default = "defaults::sync_failed_message")]
    pub sync_failed_message: String,

    /// Grapheme budget for titles inside month grid cells
    #[serde(default = "defaults::max_title_width")]
    pub max_title_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            untitled_placeholder: defaults::untitled_placeholder(),
            sync_failed_message: defaults::sync_failed_message(),
            max_title_width: defaults::max_title_width(),
        }
    }
}

mod defaults {
    // Sheet defaults
    pub fn sheet_id() -> String {
        "1Z_RZtqGpM2GdryfLiw6SOtJUZEYwO5iEx1RuFvN08-c".into()
    }
    pub fn gid() -> String {
        "675741817".into()
    }
    pub fn host() -> String {
        "https://docs.google.com".into()
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; sheetcal/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Display defaults
    pub fn untitled_placeholder() -> String {
        crate::services::UNTITLED_EVENT.into()
    }
    pub fn sync_failed_message() -> String {
        "Failed to sync with the spreadsheet. Please check your internet connection or the sheet permissions.".into()
    }
    pub fn max_title_width() -> usize {
        12
    }
}
