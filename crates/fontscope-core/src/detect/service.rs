//! Web font service detection and decomposition.
//!
//! Services are recognised from `<link href>` and `<script src>` URLs. Each
//! detected service is turned into one or more [`Font`] entries: Google
//! Fonts URLs name their families, the other services only yield a
//! placeholder.

use crate::font::name::normalize;
use crate::font::{Font, FontKind, push_unique};
use crate::provider::{Provider, detect_provider};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A font service recognised from page markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    GoogleFonts,
    AdobeFonts,
    FontAwesome,
    Cdnjs,
    FontsCom,
    Webtype,
    TypographyCom,
}

/// Which element referenced the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceElement {
    Link,
    Script,
}

/// A service reference found in the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebFontService {
    pub kind: ServiceKind,
    /// Absolute URL of the referenced resource.
    pub url: String,
    pub element: ServiceElement,
}

impl ServiceKind {
    /// Display label of the service.
    pub fn label(self) -> &'static str {
        match self {
            ServiceKind::GoogleFonts => "Google Fonts",
            ServiceKind::AdobeFonts => "Adobe Fonts",
            ServiceKind::FontAwesome => "Font Awesome",
            ServiceKind::Cdnjs => "CDNJS",
            ServiceKind::FontsCom => "Fonts.com",
            ServiceKind::Webtype => "Webtype",
            ServiceKind::TypographyCom => "Typography.com",
        }
    }

    /// Classify a `<link href>` URL. The first matching service wins.
    pub fn classify_link(href: &str) -> Option<ServiceKind> {
        let href = href.to_ascii_lowercase();
        if href.contains("fonts.googleapis.com") {
            Some(ServiceKind::GoogleFonts)
        } else if is_typekit(&href) {
            Some(ServiceKind::AdobeFonts)
        } else if href.contains("fontawesome") || href.contains("font-awesome") {
            Some(ServiceKind::FontAwesome)
        } else if href
            .find("cdnjs.cloudflare.com")
            .is_some_and(|at| href[at..].contains("font"))
        {
            Some(ServiceKind::Cdnjs)
        } else if href.contains("fonts.com") {
            Some(ServiceKind::FontsCom)
        } else if href.contains("webtype.com") {
            Some(ServiceKind::Webtype)
        } else if href.contains("typography.com") {
            Some(ServiceKind::TypographyCom)
        } else {
            None
        }
    }

    /// Classify a `<script src>` URL.
    pub fn classify_script(src: &str) -> Option<ServiceKind> {
        let src = src.to_ascii_lowercase();
        if is_typekit(&src) {
            Some(ServiceKind::AdobeFonts)
        } else if src.contains("kit.fontawesome.com") {
            Some(ServiceKind::FontAwesome)
        } else {
            None
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn is_typekit(url: &str) -> bool {
    url.contains("use.typekit.net") || url.contains("use.typekit.com")
}

/// Turn detected services into font entries.
pub fn service_fonts(services: &[WebFontService]) -> Vec<Font> {
    services.iter().flat_map(fonts_for_service).collect()
}

fn fonts_for_service(service: &WebFontService) -> Vec<Font> {
    let url = service.url.as_str();
    match service.kind {
        ServiceKind::GoogleFonts => google_font_families(url),
        ServiceKind::AdobeFonts => vec![
            Font::new(format!("Adobe Fonts Kit ({})", typekit_kit_id(url)), FontKind::Web)
                .with_source(url)
                .with_provider(Some(Provider::AdobeFonts)),
        ],
        ServiceKind::FontAwesome => vec![
            Font::new("Font Awesome", FontKind::Web)
                .with_source(url)
                .with_format("icon")
                .with_provider(Some(Provider::FontAwesome)),
        ],
        kind => vec![
            Font::new(format!("Web Font ({})", kind.label()), FontKind::Web)
                .with_source(url)
                .with_provider(detect_provider(Some(url))),
        ],
    }
}

/// Families requested by a Google Fonts stylesheet URL.
///
/// Handles both the `css2` form (`family=Inter:wght@400;700`, one parameter
/// per family) and the v1 form (`family=Inter:400,700|Lato`). Weights are
/// scoped to their family and default to `400`.
pub fn google_font_families(url: &str) -> Vec<Font> {
    let Ok(parsed) = Url::parse(url) else {
        return Vec::new();
    };
    let style = if url.contains("ital") { "italic" } else { "normal" };

    let mut fonts = Vec::new();
    for (key, value) in parsed.query_pairs() {
        if key != "family" {
            continue;
        }
        for entry in value.split('|') {
            let (name, variants) = match entry.split_once(':') {
                Some((name, variants)) => (name, Some(variants)),
                None => (entry, None),
            };
            let name = normalize(name);
            if name.is_empty() {
                continue;
            }

            let mut weights = variants.map(variant_weights).unwrap_or_default();
            if weights.is_empty() {
                weights.push("400".to_string());
            }

            let mut font = Font::new(name, FontKind::Web)
                .with_source(url)
                .with_provider(Some(Provider::GoogleFonts))
                .with_style(style);
            for weight in weights {
                font = font.with_weight(weight);
            }
            fonts.push(font);
        }
    }
    fonts
}

/// Weights listed in a family's variant suffix.
fn variant_weights(variants: &str) -> Vec<String> {
    let mut weights = Vec::new();

    match variants.split_once('@') {
        // css2: `wght@300;700`, `ital,wght@0,400;1,700`
        Some((axes, tuples)) => {
            let Some(wght_axis) = axes.split(',').position(|a| a.trim() == "wght") else {
                return weights;
            };
            for tuple in tuples.split(';') {
                if let Some(value) = tuple.split(',').nth(wght_axis) {
                    let value = value.trim();
                    if !value.is_empty() {
                        push_unique(&mut weights, value.to_string());
                    }
                }
            }
        }
        // v1: `400,700italic,regular`
        None => {
            for variant in variants.split(',') {
                let variant = variant.trim().to_ascii_lowercase();
                let digits: String = variant.chars().take_while(|c| c.is_ascii_digit()).collect();
                if !digits.is_empty() {
                    push_unique(&mut weights, digits);
                } else if variant == "regular" || variant == "italic" || variant == "i" {
                    push_unique(&mut weights, "400".to_string());
                } else if variant == "bold" || variant == "b" {
                    push_unique(&mut weights, "700".to_string());
                }
            }
        }
    }
    weights
}

/// Kit id from a Typekit URL such as `https://use.typekit.net/abc1def.js`.
fn typekit_kit_id(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file = path.rsplit('/').next().unwrap_or(path);
    let stem = file
        .strip_suffix(".js")
        .or_else(|| file.strip_suffix(".css"))
        .unwrap_or("");
    if !stem.is_empty() && stem.chars().all(|c| c.is_ascii_alphanumeric()) {
        stem.to_string()
    } else {
        "unknown".to_string()
    }
}
