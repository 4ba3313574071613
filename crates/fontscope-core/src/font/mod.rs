//! Font model: the [`Font`] value, its kind and identity key.

pub mod name;

mod merge;

pub use merge::merge_fonts;

use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How a font reaches the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontKind {
    /// Loaded via `@font-face` or a font service, with a byte source.
    Web,
    /// One of the well-known installed system fonts.
    System,
    /// Referenced by name without a resolvable source.
    Custom,
}

impl FontKind {
    /// Lower-case label used in output formats.
    pub fn as_str(self) -> &'static str {
        match self {
            FontKind::Web => "web",
            FontKind::System => "system",
            FontKind::Custom => "custom",
        }
    }
}

impl fmt::Display for FontKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FontKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(FontKind::Web),
            "system" => Ok(FontKind::System),
            "custom" => Ok(FontKind::Custom),
            other => Err(format!("unknown font type '{other}'")),
        }
    }
}

/// Identity of a font: two fonts are the same iff their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontKey {
    pub name: String,
    pub kind: FontKind,
    pub source: Option<String>,
}

/// A discovered font declaration.
///
/// `weights`, `styles` and `selectors` behave as insertion-ordered sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FontKind,
    pub source: Option<String>,
    pub weights: Vec<String>,
    pub styles: Vec<String>,
    pub format: Option<String>,
    pub provider: Option<Provider>,
    pub selectors: Vec<String>,
    #[serde(default)]
    pub face_data: BTreeMap<String, String>,
    pub unicode_range: Option<String>,
}

impl Font {
    /// Create a font with no source, weights, styles or provenance.
    pub fn new(name: impl Into<String>, kind: FontKind) -> Self {
        Self {
            name: name.into(),
            kind,
            source: None,
            weights: Vec::new(),
            styles: Vec::new(),
            format: None,
            provider: None,
            selectors: Vec::new(),
            face_data: BTreeMap::new(),
            unicode_range: None,
        }
    }

    /// Create a font classified as `System` or `Custom` from its name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = if name::is_system_font(&name) {
            FontKind::System
        } else {
            FontKind::Custom
        };
        Self::new(name, kind)
    }

    /// The identity key of this font.
    pub fn key(&self) -> FontKey {
        FontKey {
            name: self.name.clone(),
            kind: self.kind,
            source: self.source.clone(),
        }
    }

    /// Set the resource URL.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the resource format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the provider.
    pub fn with_provider(mut self, provider: Option<Provider>) -> Self {
        self.provider = provider;
        self
    }

    /// Add a weight token.
    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        push_unique(&mut self.weights, weight.into());
        self
    }

    /// Add a style token.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        push_unique(&mut self.styles, style.into());
        self
    }

    /// Add a selector to the provenance list.
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        push_unique(&mut self.selectors, selector.into());
        self
    }

    /// Whether this font is loaded from the network.
    pub fn is_web(&self) -> bool {
        self.kind == FontKind::Web
    }
}

/// Push `value` unless it is already present.
pub(crate) fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}
