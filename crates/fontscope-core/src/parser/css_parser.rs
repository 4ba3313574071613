//! Stylesheet font extraction.
//!
//! A stylesheet is read in three independent passes:
//!
//! 1. every `@font-face` block becomes a [`FontKind::Web`] font,
//! 2. style rules are walked with `cssparser` and their `font-family` / `font`
//!    declarations become `System` or `Custom` fonts,
//! 3. `@import` targets are collected for the caller to fetch.
//!
//! When the rule walk hits a structural problem (a stray top-level `}` or a
//! rule left open at end of input) the whole pass is replaced by a
//! selector-less regex scan of `font-family` declarations.

use super::error::ParseError;
use super::family::split_font_families;
use super::properties::extract_properties;
use super::shorthand::parse_font_shorthand;
use super::src::{parse_font_face_src, resolve};
use crate::font::name::{collapse_whitespace, is_non_family_value, normalize, normalize_weight};
use crate::font::{Font, FontKind};
use crate::provider::detect_provider;
use cssparser::{Delimiter, ParseError as CssParseError, Parser, ParserInput, SourceLocation, Token};
use regex::Regex;
use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::LazyLock;
use url::Url;

static FONT_FACE_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)@font-face\s*\{").expect("@font-face regex should be valid"));

static FONT_FAMILY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)font-family\s*:\s*([^;}]+)").expect("font-family regex should be valid")
});

/// `@import "x";`, `@import url(x) screen;` and friends. Quoted targets may
/// contain `;` (Google Fonts axis lists do).
static IMPORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?xi)
        @import\s+
        (?:url\(\s*)?
        (?:
            "(?P<double>[^"]+)"
            |
            '(?P<single>[^']+)'
            |
            (?P<unquoted>[^"';)\s]+)
        )
        \s*\)?[^;]*;
        "#,
    )
    .expect("@import regex should be valid")
});

/// Selector recorded for fonts found in `style` attributes.
pub const INLINE_STYLE_SELECTOR: &str = "[inline style]";

/// Everything extracted from one stylesheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CssParseOutcome {
    /// Fonts in discovery order, not yet merged.
    pub fonts: Vec<Font>,
    /// `@import` targets, resolved against the stylesheet URL when known.
    pub imports: Vec<String>,
    /// Rules that were skipped.
    pub diagnostics: Vec<ParseError>,
    /// Whether the regex scan replaced the structured rule walk.
    pub used_fallback: bool,
}

/// Extract fonts and imports from a stylesheet.
///
/// `source_url` is the stylesheet's own URL; relative `src` and `@import`
/// URLs are resolved against it. Malformed input never fails the call: bad
/// rules are skipped and reported in [`CssParseOutcome::diagnostics`].
///
/// # Example
///
/// ```
/// use fontscope_core::{FontKind, parse_css};
///
/// let outcome = parse_css("h1 { font: bold 2em Georgia, serif }", None);
/// assert_eq!(outcome.fonts[0].name, "Georgia");
/// assert_eq!(outcome.fonts[0].kind, FontKind::System);
/// ```
pub fn parse_css(css: &str, source_url: Option<&str>) -> CssParseOutcome {
    let base = source_url.and_then(|url| Url::parse(url).ok());
    let stripped = strip_comments(css);
    let mut outcome = CssParseOutcome::default();

    let faces = find_font_face_blocks(&stripped);
    for face in &faces {
        if let Some(font) = font_from_face(&stripped[face.body.clone()], base.as_ref()) {
            outcome.fonts.push(font);
        }
    }

    match parse_rules(css) {
        Ok(collected) => {
            for rule in &collected.rules {
                outcome.fonts.extend(fonts_from_rule(&rule.selector, &rule.block));
            }
            outcome.diagnostics.extend(collected.diagnostics);
        }
        Err(err) => {
            tracing::debug!("structured CSS parse failed, using regex scan: {}", err);
            outcome.diagnostics.push(err);
            outcome.used_fallback = true;
            outcome
                .fonts
                .extend(scan_font_families(&blank_ranges(&stripped, &faces)));
        }
    }

    outcome.imports = find_imports(&stripped, base.as_ref());
    outcome
}

/// An `@font-face` block located in comment-free text.
struct FaceBlock {
    /// From `@` through the closing `}`.
    span: Range<usize>,
    /// Between the braces.
    body: Range<usize>,
}

fn find_font_face_blocks(css: &str) -> Vec<FaceBlock> {
    let mut blocks = Vec::new();
    let mut resume = 0;

    for start in FONT_FACE_START_REGEX.find_iter(css) {
        if start.start() < resume {
            continue;
        }
        let Some(close) = find_block_end(css, start.end()) else {
            // Nothing after an unterminated block can close either.
            break;
        };
        blocks.push(FaceBlock {
            span: start.start()..close + 1,
            body: start.end()..close,
        });
        resume = close + 1;
    }

    blocks
}

/// Byte offset of the `}` closing a block whose body starts at `from`.
fn find_block_end(css: &str, from: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut depth = 0_usize;

    for (offset, ch) in css[from..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, ch) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '{') => depth += 1,
            (None, '}') if depth == 0 => return Some(from + offset),
            (None, '}') => depth -= 1,
            _ => {}
        }
    }
    None
}

fn font_from_face(body: &str, base: Option<&Url>) -> Option<Font> {
    let descriptors = extract_properties(body);

    let family = normalize(descriptors.get("font-family")?);
    if family.is_empty() {
        return None;
    }
    let primary = parse_font_face_src(descriptors.get("src")?, base)
        .into_iter()
        .next()?;

    let weight = descriptors
        .get("font-weight")
        .map(|w| normalize_weight(w))
        .unwrap_or_else(|| "400".to_string());
    let style = descriptors
        .get("font-style")
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_else(|| "normal".to_string());

    let mut font = Font::new(family, FontKind::Web)
        .with_provider(detect_provider(Some(&primary.url)))
        .with_source(primary.url)
        .with_weight(weight)
        .with_style(style);
    font.format = primary.format;
    font.unicode_range = descriptors.get("unicode-range").cloned();
    font.face_data = descriptors;
    Some(font)
}

/// Fonts named by an inline `style` attribute.
///
/// Both `font-family` and the `font` shorthand are read; every font carries
/// the `[inline style]` selector.
pub fn parse_inline_style(style: &str) -> Vec<Font> {
    fonts_from_rule(INLINE_STYLE_SELECTOR, style)
}

/// `@import` targets of a stylesheet, resolved against `source_url`.
pub fn extract_imports(css: &str, source_url: Option<&str>) -> Vec<String> {
    let base = source_url.and_then(|url| Url::parse(url).ok());
    find_imports(&strip_comments(css), base.as_ref())
}

/// Fonts named by one style rule's `font-family` and `font` declarations.
fn fonts_from_rule(selector: &str, block: &str) -> Vec<Font> {
    let properties = extract_properties(&strip_comments(block));
    let mut fonts = Vec::new();

    if let Some(value) = properties.get("font-family") {
        fonts.extend(
            family_names(value)
                .into_iter()
                .map(|name| Font::named(name).with_selector(selector)),
        );
    }
    if let Some(value) = properties.get("font") {
        fonts.extend(parse_font_shorthand(strip_important(value), selector));
    }

    let weight = declared_keyword(&properties, "font-weight").map(|w| normalize_weight(&w));
    let style = declared_keyword(&properties, "font-style");
    fonts
        .into_iter()
        .map(|font| {
            let font = match &weight {
                Some(w) => font.with_weight(w.clone()),
                None => font,
            };
            match &style {
                Some(s) => font.with_style(s.clone()),
                None => font,
            }
        })
        .collect()
}

fn declared_keyword(properties: &BTreeMap<String, String>, key: &str) -> Option<String> {
    let value = strip_important(properties.get(key)?);
    if value.is_empty() || is_non_family_value(value) {
        return None;
    }
    Some(value.to_ascii_lowercase())
}

/// Family names in a `font-family` value, minus keywords and `var()`.
fn family_names(value: &str) -> Vec<String> {
    let value = strip_important(value);
    split_font_families(value)
        .into_iter()
        .filter(|name| !is_non_family_value(name))
        .collect()
}

fn strip_important(value: &str) -> &str {
    let trimmed = value.trim_end();
    let lower = trimmed.to_ascii_lowercase();
    match lower.rfind('!') {
        Some(bang) if lower[bang + 1..].trim_start() == "important" => trimmed[..bang].trim_end(),
        _ => trimmed,
    }
}

/// Selector-less scan used when the structured walk fails.
fn scan_font_families(css: &str) -> Vec<Font> {
    FONT_FAMILY_REGEX
        .captures_iter(css)
        .filter_map(|captures| captures.get(1))
        .flat_map(|value| family_names(value.as_str()))
        .map(Font::named)
        .collect()
}

fn find_imports(css: &str, base: Option<&Url>) -> Vec<String> {
    let mut imports: Vec<String> = Vec::new();
    for captures in IMPORT_REGEX.captures_iter(css) {
        let Some(raw) = captures
            .name("double")
            .or_else(|| captures.name("single"))
            .or_else(|| captures.name("unquoted"))
            .map(|m| m.as_str().trim())
        else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        if let Some(url) = resolve(raw, base) {
            if !imports.contains(&url) {
                imports.push(url);
            }
        }
    }
    imports
}

/// Remove `/* ... */` comments outside strings. An unterminated comment
/// runs to the end of input.
fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut chars = css.char_indices().peekable();
    let mut quote: Option<char> = None;

    while let Some((_, ch)) = chars.next() {
        match quote {
            Some(q) => {
                out.push(ch);
                if ch == '\\' {
                    if let Some((_, escaped)) = chars.next() {
                        out.push(escaped);
                    }
                } else if ch == q {
                    quote = None;
                }
            }
            None if ch == '/' && matches!(chars.peek(), Some((_, '*'))) => {
                chars.next();
                let mut previous = '\0';
                for (_, c) in chars.by_ref() {
                    if previous == '*' && c == '/' {
                        break;
                    }
                    previous = c;
                }
                out.push(' ');
            }
            None => {
                if ch == '"' || ch == '\'' {
                    quote = Some(ch);
                }
                out.push(ch);
            }
        }
    }
    out
}

/// Replace the given blocks with spaces so later scans skip them.
fn blank_ranges(css: &str, faces: &[FaceBlock]) -> String {
    let mut out = String::with_capacity(css.len());
    let mut last = 0;
    for face in faces {
        out.push_str(&css[last..face.span.start]);
        out.push(' ');
        last = face.span.end;
    }
    out.push_str(&css[last..]);
    out
}

/// A style rule as written: selector text and raw declaration block.
struct StyleRule {
    selector: String,
    block: String,
}

#[derive(Default)]
struct CollectedRules {
    rules: Vec<StyleRule>,
    diagnostics: Vec<ParseError>,
}

/// Walk the stylesheet with `cssparser`, unwrapping one level of
/// `@media` / `@supports`.
fn parse_rules(css: &str) -> Result<CollectedRules, ParseError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut collected = CollectedRules::default();

    parse_rule_list(&mut parser, 0, &mut collected)?;
    Ok(collected)
}

fn parse_rule_list<'i>(
    parser: &mut Parser<'i, '_>,
    depth: usize,
    collected: &mut CollectedRules,
) -> Result<(), ParseError> {
    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            return Ok(());
        }

        let location = parser.current_source_location();
        let state = parser.state();
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(()),
        };

        match token {
            Token::CloseCurlyBracket => {
                return Err(ParseError::at("unmatched '}'", location));
            }
            Token::CDO | Token::CDC | Token::Semicolon => {}
            Token::AtKeyword(name) => {
                parse_at_rule(parser, &name, depth, location, collected)?;
            }
            _ => {
                parser.reset(&state);
                parse_style_rule(parser, location, collected)?;
            }
        }
    }
}

fn parse_at_rule<'i>(
    parser: &mut Parser<'i, '_>,
    name: &str,
    depth: usize,
    location: SourceLocation,
    collected: &mut CollectedRules,
) -> Result<(), ParseError> {
    let _ = parser.parse_until_before(Delimiter::Semicolon | Delimiter::CurlyBracketBlock, |p| {
        consume_all(p)
    });

    match parser.next() {
        Ok(Token::CurlyBracketBlock) => {}
        _ => return Ok(()),
    }

    let unwrap = depth == 0
        && (name.eq_ignore_ascii_case("media") || name.eq_ignore_ascii_case("supports"));
    if !unwrap {
        tracing::debug!("skipping @{} block at line {}", name, location.line + 1);
    }

    let body_start = parser.position();
    let mut nested = Ok(());
    let _ = parser.parse_nested_block(|p| {
        if unwrap {
            nested = parse_rule_list(p, depth + 1, collected);
        }
        consume_all(p)
    });
    nested?;

    if !block_closed(parser.slice_from(body_start)) {
        return Err(ParseError::at(format!("unterminated @{name} block"), location));
    }
    Ok(())
}

fn parse_style_rule<'i>(
    parser: &mut Parser<'i, '_>,
    location: SourceLocation,
    collected: &mut CollectedRules,
) -> Result<(), ParseError> {
    let start = parser.position();
    let mut stray_brace = false;
    let mut bad_token = false;
    let _ = parser.parse_until_before(Delimiter::CurlyBracketBlock, |p| {
        while let Ok(token) = p.next() {
            match token {
                Token::CloseCurlyBracket => stray_brace = true,
                Token::BadString(_) | Token::BadUrl(_) => bad_token = true,
                _ => {}
            }
        }
        Ok::<_, CssParseError<'i, ()>>(())
    });
    if stray_brace {
        return Err(ParseError::at("unmatched '}'", location));
    }
    let selector = collapse_whitespace(&strip_comments(parser.slice_from(start)));

    match parser.next() {
        Ok(Token::CurlyBracketBlock) => {}
        _ => {
            return Err(ParseError::at(
                format!("rule '{selector}' has no declaration block"),
                location,
            ));
        }
    }

    let body_start = parser.position();
    let block = parser.parse_nested_block(|p| {
        let start = p.position();
        consume_all(p)?;
        Ok::<_, CssParseError<'i, ()>>(p.slice_from(start))
    });
    if !block_closed(parser.slice_from(body_start)) {
        return Err(ParseError::at(
            format!("rule '{selector}' is not closed"),
            location,
        ));
    }

    match block {
        Ok(block) if !bad_token && !selector.is_empty() => {
            collected.rules.push(StyleRule {
                selector,
                block: block.to_string(),
            });
        }
        _ => {
            tracing::debug!("skipping malformed rule at line {}", location.line + 1);
            collected
                .diagnostics
                .push(ParseError::at(format!("skipped malformed rule '{selector}'"), location));
        }
    }
    Ok(())
}

/// Whether a consumed block body ends with its own closing `}`, not just
/// the `}` of a nested rule.
fn block_closed(body: &str) -> bool {
    let body = strip_comments(body);
    find_block_end(&body, 0).is_some_and(|end| end + 1 == body.trim_end().len())
}

fn consume_all<'i>(parser: &mut Parser<'i, '_>) -> Result<(), CssParseError<'i, ()>> {
    while parser.next().is_ok() {}
    Ok(())
}
