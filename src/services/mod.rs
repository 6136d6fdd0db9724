//! Service layer for the calendar application.
//!
//! This module contains the ingestion logic:
//! - CSV line tokenizing (`tokenize`)
//! - Header-driven column role inference (`infer_roles`)
//! - Row-to-event materialization (`Materializer`)
//! - Feed fetching (`FeedLoader`)

mod dates;
mod feed;
mod materializer;
mod roles;
mod tokenizer;

pub use dates::{extract_time, parse_date};
pub use feed::{FeedLoader, FeedTransport, HttpTransport, parse_feed, parse_feed_default};
pub use materializer::{Materializer, RowRejection, UNTITLED_EVENT, materialize};
pub use roles::infer_roles;
pub use tokenizer::tokenize;
