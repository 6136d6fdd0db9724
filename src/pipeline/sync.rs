// src/pipeline/sync.rs

//! Fetch the feed into a fresh application state.

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{AppState, Config};
use crate::services::{FeedLoader, FeedTransport};
use crate::utils::console;

/// Sync the configured sheet over HTTP.
pub async fn run_sync(config: &Config, today: NaiveDate) -> Result<AppState> {
    let loader = FeedLoader::from_config(config)?;
    sync_with(&loader, config, today).await
}

/// Sync through an arbitrary loader.
///
/// On failure the generic banner is shown and the original cause is
/// returned for the caller's exit status; details are only in the log.
pub async fn sync_with<T: FeedTransport>(
    loader: &FeedLoader<T>,
    config: &Config,
    today: NaiveDate,
) -> Result<AppState> {
    let mut state = AppState::new(today, config.display.sync_failed_message.clone());
    let ticket = state.begin_load();

    match loader.load().await {
        Ok(events) => {
            state.load_succeeded(ticket, events);
            Ok(state)
        }
        Err(failure) => {
            state.load_failed(ticket, &failure);
            if let Some(message) = state.error() {
                console::banner(message);
            }
            Err(failure.into())
        }
    }
}
