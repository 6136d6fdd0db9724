// src/services/feed.rs

//! Feed loading: fetch the CSV export and turn it into events.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{FetchFailure, Result};
use crate::models::{CalendarEvent, Config};
use crate::services::materializer::{Materializer, UNTITLED_EVENT};
use crate::services::roles::infer_roles;
use crate::services::tokenizer::tokenize;
use crate::utils::http;

/// Source of raw feed text.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    /// GET `url` and return the body as text.
    async fn get_text(&self, url: &Url) -> std::result::Result<String, FetchFailure>;
}

/// HTTP transport backed by `reqwest`.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a transport from the `[http]` settings.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(http::create_async_client(&config.http)?))
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn get_text(&self, url: &Url) -> std::result::Result<String, FetchFailure> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchFailure::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::http(status));
        }

        response.text().await.map_err(FetchFailure::transport)
    }
}

/// Fetches one sheet and materializes its rows.
pub struct FeedLoader<T: FeedTransport> {
    transport: T,
    url: Url,
    placeholder: String,
}

impl FeedLoader<HttpTransport> {
    /// Loader for the configured sheet over HTTP.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::from_config(config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: FeedTransport> FeedLoader<T> {
    pub fn with_transport(config: &Config, transport: T) -> Result<Self> {
        Ok(Self {
            transport,
            url: config.sheet.export_url()?,
            placeholder: config.display.untitled_placeholder.clone(),
        })
    }

    /// Export URL this loader fetches.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch the feed and return its events sorted by date.
    ///
    /// A feed with no data rows is an empty list, not a failure.
    pub async fn load(&self) -> std::result::Result<Vec<CalendarEvent>, FetchFailure> {
        log::debug!("Fetching feed from {}", self.url);

        let text = match self.transport.get_text(&self.url).await {
            Ok(text) => text,
            Err(failure) => {
                log::error!("Error fetching sheet data: {}", failure);
                return Err(failure);
            }
        };

        let events = parse_feed(&text, &self.placeholder);
        log::info!("Loaded {} event(s)", events.len());
        Ok(events)
    }
}

/// Parse a whole CSV export into sorted events.
///
/// Lines are split on `\n` or `\r\n` and blank lines are dropped. The first
/// remaining line is the header; fewer than two lines yield no events.
pub fn parse_feed(text: &str, placeholder: &str) -> Vec<CalendarEvent> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    let Some((header_line, data_lines)) = lines.split_first() else {
        return Vec::new();
    };
    if data_lines.is_empty() {
        log::debug!("Feed has a header but no data rows");
        return Vec::new();
    }

    let headers = tokenize(header_line);
    let roles = infer_roles(&headers);
    log::debug!("Inferred column roles: {:?}", roles);

    let rows: Vec<Vec<String>> = data_lines.iter().map(|l| tokenize(l)).collect();
    Materializer::with_placeholder(&headers, roles, placeholder).materialize(&rows)
}

/// [`parse_feed`] with the default placeholder.
pub fn parse_feed_default(text: &str) -> Vec<CalendarEvent> {
    parse_feed(text, UNTITLED_EVENT)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Transport returning canned responses and recording requested URLs.
    struct StubTransport {
        response: std::result::Result<String, FetchFailure>,
        requested: Mutex<Vec<String>>,
    }

    impl StubTransport {
        fn ok(body: &str) -> Self {
            Self {
                response: Ok(body.to_string()),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn failing(failure: FetchFailure) -> Self {
            Self {
                response: Err(failure),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl FeedTransport for StubTransport {
        async fn get_text(&self, url: &Url) -> std::result::Result<String, FetchFailure> {
            self.requested.lock().unwrap().push(url.to_string());
            self.response.clone()
        }
    }

    const FEED: &str = "Event Date,Event Title,Notes,Venue\r\n\
        2024-03-10,Spring Fair,Bring friends,Quad\r\n\
        \r\n\
        2024-13-45,Broken Date,,\r\n\
        ,Missing Date,,\r\n\
        2024-01-05 09:30,Kickoff,\"Coffee, then talks\",Hall\r\n\
        2024-02-20,,,\r\n";

    #[test]
    fn test_parse_feed_end_to_end() {
        let events = parse_feed_default(FEED);
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Kickoff", "Untitled Event", "Spring Fair"]);

        let kickoff = &events[0];
        assert_eq!(kickoff.id, "evt-4");
        assert_eq!(kickoff.description, "Coffee, then talks");
        assert_eq!(kickoff.location.as_deref(), Some("Hall"));
        assert_eq!(kickoff.time.as_deref(), Some("09:30"));
        assert_eq!(kickoff.raw.len(), 4);
    }

    #[test]
    fn test_header_only_feed_is_empty() {
        assert!(parse_feed_default("Date,Title\n\n   \n").is_empty());
        assert!(parse_feed_default("").is_empty());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let first = serde_json::to_string(&parse_feed_default(FEED)).unwrap();
        let second = serde_json::to_string(&parse_feed_default(FEED)).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_loader_uses_export_url() {
        let config = Config::default();
        let loader = FeedLoader::with_transport(&config, StubTransport::ok(FEED)).unwrap();

        let events = loader.load().await.unwrap();
        assert_eq!(events.len(), 3);

        let requested = loader.transport.requested.lock().unwrap();
        assert_eq!(requested.len(), 1);
        assert!(requested[0].ends_with("/export?format=csv&gid=675741817"));
    }

    #[tokio::test]
    async fn test_loader_propagates_failure() {
        let config = Config::default();
        let failure = FetchFailure::http("403 Forbidden");
        let loader =
            FeedLoader::with_transport(&config, StubTransport::failing(failure.clone())).unwrap();

        assert_eq!(loader.load().await, Err(failure));
    }

    #[tokio::test]
    async fn test_loader_uses_configured_placeholder() {
        let mut config = Config::default();
        config.display.untitled_placeholder = "TBD".to_string();
        let loader =
            FeedLoader::with_transport(&config, StubTransport::ok("Date,Title\n2024-01-01,\n"))
                .unwrap();

        let events = loader.load().await.unwrap();
        assert_eq!(events[0].title, "TBD");
    }
}
