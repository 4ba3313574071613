//! Fetching for Fontscope.
//!
//! This crate provides the network side of a font scan:
//!
//! - **HTTP Client**: reqwest-backed client with timeouts, redirect limits
//!   and a browser-like user agent
//! - **Retries**: exponential backoff for timeouts, connection failures,
//!   `429` and `5xx` responses
//! - **Pacing**: a minimum delay between consecutive requests
//! - **Fetcher**: the trait the scraper consumes, so tests can serve pages
//!   from memory
//!
//! # Example
//!
//! ```ignore
//! use fontscope_net::{Fetcher, HttpClient};
//! use std::time::Duration;
//!
//! let client = HttpClient::builder()
//!     .timeout(Duration::from_secs(15))
//!     .request_delay(Duration::from_millis(500))
//!     .build()?;
//!
//! let html = client.fetch_html("https://example.com").await?;
//! let css = client.fetch_css("https://example.com/site.css").await?;
//! ```

pub mod http;

mod error;
mod fetcher;

pub use error::{NetworkError, Result};
pub use fetcher::Fetcher;
pub use http::{HttpClient, HttpClientBuilder, HttpClientConfig, RequestPacer, RetryConfig};
