//! Combining HTML and CSS signals into the final font list.

mod analyze;
mod result;
mod service;

pub use analyze::{AnalyzeOptions, CssDocument, HtmlSignals, analyze, finalize_fonts, normalize_page_url};
pub use result::{ScrapeResult, Statistics, Summary};
pub use service::{ServiceElement, ServiceKind, WebFontService, google_font_families, service_fonts};
