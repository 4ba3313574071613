//! Font signals read from page markup.
//!
//! [`HtmlDocument`] wraps a parsed page. The parsed tree is not `Send`, so
//! callers that cross an `.await` take a [`PageSignals`] snapshot first.

use std::sync::LazyLock;

use fontscope_core::detect::{ServiceElement, ServiceKind, WebFontService};
use scraper::{Html, Selector};
use url::Url;

static STYLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("style").expect("style selector should be valid"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("link[href]").expect("link selector should be valid"));
static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script[src]").expect("script selector should be valid"));
static STYLE_ATTR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[style]").expect("style attribute selector should be valid"));

/// A parsed HTML page.
pub struct HtmlDocument {
    html: Html,
}

/// Owned copy of everything the scraper needs from a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSignals {
    /// Text of each non-empty `<style>` element.
    pub style_blocks: Vec<String>,
    /// Absolute stylesheet URLs, in document order.
    pub stylesheet_links: Vec<String>,
    /// `style` attribute values that mention fonts.
    pub inline_styles: Vec<String>,
    pub services: Vec<WebFontService>,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// Text of every non-empty `<style>` element.
    pub fn inline_style_blocks(&self) -> Vec<String> {
        self.html
            .select(&STYLE_SELECTOR)
            .map(|element| element.text().collect::<String>())
            .filter(|text| !text.trim().is_empty())
            .collect()
    }

    /// Absolute URLs of `<link rel="stylesheet">` elements, deduplicated.
    ///
    /// `rel` is a token list, so `rel="alternate stylesheet"` counts.
    pub fn stylesheet_links(&self, base: &Url) -> Vec<String> {
        let mut links = Vec::new();
        for element in self.html.select(&LINK_SELECTOR) {
            let is_stylesheet = element.value().attr("rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("stylesheet"))
            });
            if !is_stylesheet {
                continue;
            }
            if let Some(url) = element.value().attr("href").and_then(|href| resolve(base, href))
                && !links.contains(&url)
            {
                links.push(url);
            }
        }
        links
    }

    /// `style` attribute values that mention `font`.
    pub fn inline_style_attributes(&self) -> Vec<String> {
        self.html
            .select(&STYLE_ATTR_SELECTOR)
            .filter_map(|element| element.value().attr("style"))
            .filter(|style| style.to_ascii_lowercase().contains("font"))
            .map(str::to_string)
            .collect()
    }

    /// Font services referenced by `<link href>` and `<script src>`.
    pub fn web_font_services(&self, base: &Url) -> Vec<WebFontService> {
        let links = self
            .html
            .select(&LINK_SELECTOR)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| resolve(base, href))
            .filter_map(|url| {
                ServiceKind::classify_link(&url).map(|kind| WebFontService {
                    kind,
                    url,
                    element: ServiceElement::Link,
                })
            });
        let scripts = self
            .html
            .select(&SCRIPT_SELECTOR)
            .filter_map(|element| element.value().attr("src"))
            .filter_map(|src| resolve(base, src))
            .filter_map(|url| {
                ServiceKind::classify_script(&url).map(|kind| WebFontService {
                    kind,
                    url,
                    element: ServiceElement::Script,
                })
            });

        let mut services: Vec<WebFontService> = Vec::new();
        for service in links.chain(scripts) {
            if !services.contains(&service) {
                services.push(service);
            }
        }
        services
    }

    /// Snapshot all signals, resolving URLs against `base`.
    pub fn signals(&self, base: &Url) -> PageSignals {
        PageSignals {
            style_blocks: self.inline_style_blocks(),
            stylesheet_links: self.stylesheet_links(base),
            inline_styles: self.inline_style_attributes(),
            services: self.web_font_services(base),
        }
    }
}

impl std::fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDocument").finish_non_exhaustive()
    }
}

fn resolve(base: &Url, reference: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    match base.join(reference) {
        Ok(url) => Some(url.to_string()),
        Err(err) => {
            tracing::debug!("ignoring unresolvable reference {:?}: {}", reference, err);
            None
        }
    }
}
