//! Web font provider classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The service a font resource is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "Google Fonts")]
    GoogleFonts,
    #[serde(rename = "Adobe Fonts")]
    AdobeFonts,
    #[serde(rename = "Font Awesome")]
    FontAwesome,
    #[serde(rename = "CDNJS")]
    Cdnjs,
    #[serde(rename = "Commercial Web Fonts")]
    CommercialWebFonts,
    #[serde(rename = "Custom")]
    Custom,
}

impl Provider {
    /// Human-readable provider name.
    pub fn display_name(self) -> &'static str {
        match self {
            Provider::GoogleFonts => "Google Fonts",
            Provider::AdobeFonts => "Adobe Fonts",
            Provider::FontAwesome => "Font Awesome",
            Provider::Cdnjs => "CDNJS",
            Provider::CommercialWebFonts => "Commercial Web Fonts",
            Provider::Custom => "Custom",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Classify a font resource URL by the service hosting it.
///
/// Rules are checked in order and the first match wins. Any other non-empty
/// URL is [`Provider::Custom`]; a missing or empty URL has no provider.
pub fn detect_provider(url: Option<&str>) -> Option<Provider> {
    let url = url?.trim();
    if url.is_empty() {
        return None;
    }
    let url = url.to_ascii_lowercase();

    let provider = if url.contains("fonts.googleapis.com") || url.contains("fonts.gstatic.com") {
        Provider::GoogleFonts
    } else if url.contains("use.typekit.net") || url.contains("use.typekit.com") {
        Provider::AdobeFonts
    } else if url.contains("fontawesome") {
        Provider::FontAwesome
    } else if url.contains("cdnjs.cloudflare.com") && url.contains("font") {
        Provider::Cdnjs
    } else if url.contains("fonts.com") || url.contains("webtype.com") || url.contains("typography.com")
    {
        Provider::CommercialWebFonts
    } else {
        Provider::Custom
    };
    Some(provider)
}
