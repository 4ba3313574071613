//! Per-URL analysis results.

use crate::font::{Font, FontKind};
use crate::provider::Provider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fonts found on one page, with the stylesheets consulted and any
/// non-fatal errors met along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub url: String,
    pub fonts: Vec<Font>,
    pub css_files: Vec<String>,
    pub errors: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Counts derived from a [`ScrapeResult`]'s font list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_fonts: usize,
    pub web_fonts: usize,
    pub system_fonts: usize,
    pub custom_fonts: usize,
    pub google_fonts: usize,
    pub adobe_fonts: usize,
    pub css_files_count: usize,
}

/// Breakdown of a result by kind, provider, format, weight and style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_fonts: usize,
    pub by_kind: BTreeMap<String, usize>,
    pub by_provider: BTreeMap<String, usize>,
    pub by_format: BTreeMap<String, usize>,
    pub by_weight: BTreeMap<String, usize>,
    pub by_style: BTreeMap<String, usize>,
    pub css_files: usize,
    pub errors: usize,
}

impl ScrapeResult {
    /// An empty result for `url`, stamped with the current time.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fonts: Vec::new(),
            css_files: Vec::new(),
            errors: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Record a non-fatal error.
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    /// Record a consulted stylesheet once.
    pub fn add_css_file(&mut self, source: impl Into<String>) {
        let source = source.into();
        if !self.css_files.contains(&source) {
            self.css_files.push(source);
        }
    }

    /// Fonts of one kind, in result order.
    pub fn fonts_of_kind(&self, kind: FontKind) -> impl Iterator<Item = &Font> {
        self.fonts.iter().filter(move |f| f.kind == kind)
    }

    /// Keep only fonts of `kind`.
    pub fn retain_kind(&mut self, kind: FontKind) {
        self.fonts.retain(|f| f.kind == kind);
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Counts over the current font list.
    pub fn statistics(&self) -> Statistics {
        let mut stats = Statistics {
            total_fonts: self.fonts.len(),
            css_files_count: self.css_files.len(),
            ..Statistics::default()
        };
        for font in &self.fonts {
            match font.kind {
                FontKind::Web => stats.web_fonts += 1,
                FontKind::System => stats.system_fonts += 1,
                FontKind::Custom => stats.custom_fonts += 1,
            }
            match font.provider {
                Some(Provider::GoogleFonts) => stats.google_fonts += 1,
                Some(Provider::AdobeFonts) => stats.adobe_fonts += 1,
                _ => {}
            }
        }
        stats
    }

    /// Detailed breakdown of the current font list.
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            total_fonts: self.fonts.len(),
            css_files: self.css_files.len(),
            errors: self.errors.len(),
            ..Summary::default()
        };
        for font in &self.fonts {
            *summary.by_kind.entry(font.kind.to_string()).or_default() += 1;
            if let Some(provider) = font.provider {
                *summary.by_provider.entry(provider.to_string()).or_default() += 1;
            }
            if let Some(format) = &font.format {
                *summary.by_format.entry(format.clone()).or_default() += 1;
            }
            for weight in &font.weights {
                *summary.by_weight.entry(weight.clone()).or_default() += 1;
            }
            for style in &font.styles {
                *summary.by_style.entry(style.clone()).or_default() += 1;
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> ScrapeResult {
        let mut result = ScrapeResult::new("https://example.com");
        result.fonts = vec![
            Font::new("Roboto", FontKind::Web)
                .with_source("https://fonts.googleapis.com/css2?family=Roboto")
                .with_provider(Some(Provider::GoogleFonts))
                .with_weight("400")
                .with_weight("700")
                .with_style("normal"),
            Font::new("Adobe Fonts Kit (abc)", FontKind::Web)
                .with_provider(Some(Provider::AdobeFonts)),
            Font::new("Inter", FontKind::Web)
                .with_format("woff2")
                .with_provider(Some(Provider::Custom))
                .with_weight("400"),
            Font::named("Arial"),
            Font::named("Brand Sans"),
        ];
        result.add_css_file("inline");
        result.add_css_file("https://example.com/site.css");
        result.add_css_file("inline");
        result.add_error("Failed to fetch CSS https://example.com/missing.css");
        result
    }

    #[test]
    fn statistics_follow_font_list() {
        let mut result = result();
        assert_eq!(
            result.statistics(),
            Statistics {
                total_fonts: 5,
                web_fonts: 3,
                system_fonts: 1,
                custom_fonts: 1,
                google_fonts: 1,
                adobe_fonts: 1,
                css_files_count: 2,
            }
        );

        result.retain_kind(FontKind::Web);
        let stats = result.statistics();
        assert_eq!(stats.total_fonts, 3);
        assert_eq!(stats.system_fonts, 0);
    }

    #[test]
    fn summary_breakdown() {
        let summary = result().summary();
        assert_eq!(summary.by_kind["web"], 3);
        assert_eq!(summary.by_kind["system"], 1);
        assert_eq!(summary.by_provider["Google Fonts"], 1);
        assert_eq!(summary.by_format["woff2"], 1);
        assert_eq!(summary.by_weight["400"], 2);
        assert_eq!(summary.by_weight["700"], 1);
        assert_eq!(summary.by_style["normal"], 1);
        assert_eq!(summary.css_files, 2);
        assert_eq!(summary.errors, 1);
    }

    #[test]
    fn fonts_of_kind_preserves_order() {
        let result = result();
        let web: Vec<_> = result.fonts_of_kind(FontKind::Web).map(|f| f.name.as_str()).collect();
        assert_eq!(web, vec!["Roboto", "Adobe Fonts Kit (abc)", "Inter"]);
    }
}
