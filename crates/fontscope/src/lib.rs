//! Fontscope finds the fonts a website uses.
//!
//! A scan fetches a page, its `<style>` blocks, linked stylesheets and their
//! `@import`s, then reports every font it finds: `@font-face` web fonts,
//! families named in style rules and `style` attributes, and fonts served by
//! services such as Google Fonts or Adobe Fonts.
//!
//! The parsing and merging logic lives in [`fontscope_core`]; fetching in
//! [`fontscope_net`]. This crate ties them together and adds configuration,
//! report formatting and the `fontscope` command.
//!
//! # Example
//!
//! ```no_run
//! use fontscope::{FontScraper, ScraperConfig};
//! use fontscope_net::HttpClient;
//!
//! # async fn scan() -> fontscope::Result<()> {
//! let config = ScraperConfig::default();
//! let client = HttpClient::with_config(config.to_http_config())?;
//! let scraper = FontScraper::new(client, &config);
//!
//! let result = scraper.analyze_website("example.com").await;
//! for font in &result.fonts {
//!     println!("{} ({})", font.name, font.kind);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod html;
pub mod logging;
pub mod output;

mod error;
mod scan;

pub use config::ScraperConfig;
pub use error::{Error, Result};
pub use html::{HtmlDocument, PageSignals};
pub use output::OutputFormat;
pub use scan::{FontScraper, ScrapeOptions, filter_by_kind};

pub use fontscope_core::{Font, FontKind, ScrapeResult, Statistics};
