//! `@font-face` `src` descriptor parsing.

use super::split_top_level;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Matches `url(...)` with double, single or no quotes.
static URL_FUNCTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?xi)
        url\s*\(\s*
        (?:
            "(?P<double>[^"]*)"
            |
            '(?P<single>[^']*)'
            |
            (?P<unquoted>[^)]*?)
        )
        \s*\)
        "#,
    )
    .expect("url() regex should be valid")
});

/// Matches `format(...)` with optional quotes.
static FORMAT_FUNCTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)format\s*\(\s*["']?([^"')]*)["']?\s*\)"#)
        .expect("format() regex should be valid")
});

/// One entry of an `@font-face` `src` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSource {
    /// Absolute URL when a base was available, otherwise the URL as written.
    pub url: String,
    /// Declared `format()` token or the format inferred from the extension.
    pub format: Option<String>,
}

/// Parse an `@font-face` `src` value into its URL sources.
///
/// Entries without `url(...)` (such as `local(...)`) are dropped, as are
/// relative URLs that cannot be joined onto `base`. Order follows the
/// declaration, so the first element is the primary source.
pub fn parse_font_face_src(value: &str, base: Option<&Url>) -> Vec<FontSource> {
    split_top_level(value, ',')
        .into_iter()
        .filter_map(|fragment| parse_fragment(fragment, base))
        .collect()
}

fn parse_fragment(fragment: &str, base: Option<&Url>) -> Option<FontSource> {
    let captures = URL_FUNCTION_REGEX.captures(fragment)?;
    let raw = captures
        .name("double")
        .or_else(|| captures.name("single"))
        .or_else(|| captures.name("unquoted"))
        .map(|m| m.as_str().trim())?;
    if raw.is_empty() {
        return None;
    }

    let url = resolve(raw, base)?;
    let format = FORMAT_FUNCTION_REGEX
        .captures(fragment)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_ascii_lowercase())
        .filter(|f| !f.is_empty())
        .or_else(|| format_from_url(raw).map(str::to_string));

    Some(FontSource { url, format })
}

/// Resolve `raw` against `base`. Absolute and `data:` URLs pass through.
pub(crate) fn resolve(raw: &str, base: Option<&Url>) -> Option<String> {
    if raw.starts_with("data:") {
        return Some(raw.to_string());
    }
    if let Ok(parsed) = Url::parse(raw) {
        return Some(parsed.to_string());
    }
    match base {
        Some(base) => base.join(raw).ok().map(|joined| joined.to_string()),
        None => Some(raw.to_string()),
    }
}

/// Infer the font format from a URL's file extension.
pub(crate) fn format_from_url(url: &str) -> Option<&'static str> {
    if url.starts_with("data:") {
        return None;
    }
    let clean = url.split(['?', '#']).next().unwrap_or(url);
    let file = clean.rsplit('/').next().unwrap_or(clean);
    let (_, extension) = file.rsplit_once('.')?;

    match extension.to_ascii_lowercase().as_str() {
        "woff2" => Some("woff2"),
        "woff" => Some("woff"),
        "ttf" => Some("truetype"),
        "otf" => Some("opentype"),
        "eot" => Some("embedded-opentype"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/css/site.css").unwrap()
    }

    #[test]
    fn resolves_relative_urls_in_order() {
        let sources = parse_font_face_src(
            "url('../fonts/a.woff2') format('woff2'), url(b.woff) format(\"woff\")",
            Some(&base()),
        );
        assert_eq!(
            sources,
            vec![
                FontSource {
                    url: "https://example.com/fonts/a.woff2".into(),
                    format: Some("woff2".into()),
                },
                FontSource {
                    url: "https://example.com/css/b.woff".into(),
                    format: Some("woff".into()),
                },
            ]
        );
    }

    #[test]
    fn infers_format_from_extension() {
        let sources = parse_font_face_src(
            "url(/f/a.ttf?v=3#iefix), url(/f/b.otf), url(/f/c.eot), url(/f/d.svg)",
            Some(&base()),
        );
        let formats: Vec<_> = sources.iter().map(|s| s.format.as_deref()).collect();
        assert_eq!(
            formats,
            vec![
                Some("truetype"),
                Some("opentype"),
                Some("embedded-opentype"),
                None
            ]
        );
    }

    #[test]
    fn drops_local_entries() {
        let sources = parse_font_face_src("local('Inter'), local(Inter-Regular)", Some(&base()));
        assert!(sources.is_empty());

        let sources = parse_font_face_src("local(Inter), url(inter.woff2)", Some(&base()));
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url, "https://example.com/css/inter.woff2");
    }

    #[test]
    fn keeps_data_uris_whole() {
        let sources = parse_font_face_src(
            "url(data:font/woff2;base64,d09GMgAB) format('woff2')",
            Some(&base()),
        );
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url, "data:font/woff2;base64,d09GMgAB");
        assert_eq!(sources[0].format.as_deref(), Some("woff2"));
    }

    #[test]
    fn without_base_keeps_raw_url() {
        let sources = parse_font_face_src("url(fonts/a.woff)", None);
        assert_eq!(sources[0].url, "fonts/a.woff");
        assert_eq!(sources[0].format.as_deref(), Some("woff"));
    }

    #[test]
    fn empty_url_is_dropped() {
        assert!(parse_font_face_src("url('')", Some(&base())).is_empty());
    }
}
