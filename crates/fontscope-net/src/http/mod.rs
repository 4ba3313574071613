//! HTTP fetching for font scans.
//!
//! # Example
//!
//! ```ignore
//! use fontscope_net::http::HttpClient;
//!
//! let client = HttpClient::builder()
//!     .user_agent("MyScanner/1.0")
//!     .max_retries(1)
//!     .build()?;
//!
//! let html = client.get_text("https://example.com", HTML_ACCEPT).await?;
//! ```

mod client;
mod pacer;
mod retry;

pub use client::{
    CSS_ACCEPT, DEFAULT_USER_AGENT, HTML_ACCEPT, HttpClient, HttpClientBuilder, HttpClientConfig,
    looks_like_css,
};
pub use pacer::RequestPacer;
pub use retry::RetryConfig;
