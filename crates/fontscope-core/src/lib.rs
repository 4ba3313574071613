//! Font extraction core for Fontscope.
//!
//! This crate turns raw CSS and HTML-derived signals into a deduplicated list
//! of fonts. It performs no I/O; fetching lives in `fontscope-net` and HTML
//! handling in the `fontscope` crate.
//!
//! - **Parsing**: `@font-face` blocks, `font-family` and `font` declarations,
//!   `@import` discovery
//! - **Normalization**: family-name cleanup, system and generic family lookup
//! - **Merging**: identity-keyed, order-preserving deduplication
//! - **Detection**: web font service decomposition and final filtering
//!
//! # Example
//!
//! ```
//! use fontscope_core::prelude::*;
//!
//! let css = r#"
//!     @font-face { font-family: "Inter"; src: url(/fonts/inter.woff2); }
//!     body { font-family: Inter, Arial, sans-serif; }
//! "#;
//!
//! let outcome = parse_css(css, Some("https://example.com/app.css"));
//! let fonts = merge_fonts(outcome.fonts);
//! assert_eq!(fonts.len(), 4);
//! assert_eq!(fonts[0].kind, FontKind::Web);
//! assert_eq!(fonts[1].kind, FontKind::Custom);
//! ```

pub mod detect;
pub mod font;
pub mod parser;
pub mod provider;

mod error;

pub use detect::{
    AnalyzeOptions, CssDocument, HtmlSignals, ScrapeResult, ServiceKind, Statistics, Summary,
    WebFontService, analyze, finalize_fonts, normalize_page_url,
};
pub use error::{Error, Result};
pub use font::{Font, FontKey, FontKind, merge_fonts};
pub use parser::{CssParseOutcome, FontSource, ParseError, parse_css};
pub use provider::{Provider, detect_provider};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::detect::{
        AnalyzeOptions, CssDocument, HtmlSignals, ScrapeResult, ServiceKind, Statistics,
        WebFontService, analyze, finalize_fonts, normalize_page_url, service_fonts,
    };
    pub use crate::font::name::{is_generic_family, is_system_font, normalize};
    pub use crate::font::{Font, FontKey, FontKind, merge_fonts};
    pub use crate::parser::{
        CssParseOutcome, FontSource, extract_imports, extract_properties, parse_css,
        parse_font_face_src, parse_font_shorthand, parse_inline_style, split_font_families,
    };
    pub use crate::provider::{Provider, detect_provider};
}
