//! Final font list assembly.

use super::result::ScrapeResult;
use super::service::{WebFontService, service_fonts};
use crate::error::{Error, Result};
use crate::font::name::is_generic_family;
use crate::font::{Font, FontKind, merge_fonts};
use crate::parser::{parse_css, parse_inline_style};
use url::Url;

/// Filtering switches applied to the merged font list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Keep fonts classified as [`FontKind::System`].
    pub include_system: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            include_system: true,
        }
    }
}

/// Font-related signals taken from a page's HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlSignals {
    /// `style` attribute values that mention fonts.
    pub inline_styles: Vec<String>,
    /// Font services referenced by `<link>` and `<script>` elements.
    pub services: Vec<WebFontService>,
    /// Problems met while collecting signals and stylesheets.
    pub errors: Vec<String>,
}

/// One stylesheet's text and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssDocument {
    /// Stylesheet URL, or `inline` for `<style>` blocks.
    pub source: String,
    /// URL that relative references resolve against.
    pub base_url: Option<String>,
    pub text: String,
}

impl CssDocument {
    /// Source id used for `<style>` blocks.
    pub const INLINE: &'static str = "inline";

    /// A fetched stylesheet; it is its own base.
    pub fn external(url: impl Into<String>, text: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            base_url: Some(url.clone()),
            source: url,
            text: text.into(),
        }
    }

    /// A `<style>` block of the page at `page_url`.
    pub fn inline(page_url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: Self::INLINE.to_string(),
            base_url: Some(page_url.into()),
            text: text.into(),
        }
    }
}

/// Merge all discovered fonts and apply the output filters.
///
/// Fonts are concatenated in argument order, merged by identity, then
/// system fonts (unless `include_system`), nameless fonts and generic
/// families are removed.
pub fn finalize_fonts(
    html_fonts: Vec<Font>,
    css_fonts: Vec<Font>,
    service_fonts: Vec<Font>,
    options: &AnalyzeOptions,
) -> Vec<Font> {
    merge_fonts(html_fonts.into_iter().chain(css_fonts).chain(service_fonts))
        .into_iter()
        .filter(|font| options.include_system || font.kind != FontKind::System)
        .filter(|font| !font.name.trim().is_empty())
        .filter(|font| !is_generic_family(&font.name))
        .collect()
}

/// Build the result for `url` from its HTML signals and stylesheets.
pub fn analyze(
    url: &str,
    html: &HtmlSignals,
    css_documents: &[CssDocument],
    options: &AnalyzeOptions,
) -> ScrapeResult {
    let mut result = ScrapeResult::new(url);

    let html_fonts: Vec<Font> = html
        .inline_styles
        .iter()
        .flat_map(|style| parse_inline_style(style))
        .collect();

    let mut css_fonts = Vec::new();
    for document in css_documents {
        let outcome = parse_css(&document.text, document.base_url.as_deref());
        for diagnostic in &outcome.diagnostics {
            tracing::debug!("{} in {}", diagnostic, document.source);
        }
        css_fonts.extend(outcome.fonts);
        result.add_css_file(document.source.clone());
    }

    result.fonts = finalize_fonts(html_fonts, css_fonts, service_fonts(&html.services), options);
    result.errors.extend(html.errors.iter().cloned());
    result
}

/// Parse a user-supplied page URL, defaulting the scheme to `https`.
pub fn normalize_page_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let url = Url::parse(&candidate).map_err(|e| Error::invalid_url(raw, e.to_string()))?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(Error::invalid_url(raw, "missing host")),
    }
}
