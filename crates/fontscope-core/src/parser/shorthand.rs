//! `font` shorthand parsing.

use super::family::split_font_families;
use crate::font::Font;
use crate::font::name::is_non_family_value;
use regex::Regex;
use std::sync::LazyLock;

/// A `font-size` token, optionally followed by `/line-height`.
static SIZE_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+(\.\d+)?(px|em|rem|%|pt|pc|in|cm|mm|ex|ch|vw|vh|vmin|vmax)")
        .expect("font size regex should be valid")
});

/// Extract the families named by a `font` shorthand value.
///
/// The families are whatever follows the first size token. A value with no
/// recognisable size (e.g. `font: menu`) yields nothing.
pub fn parse_font_shorthand(value: &str, selector: &str) -> Vec<Font> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let Some(size_idx) = tokens.iter().position(|t| SIZE_TOKEN_REGEX.is_match(t)) else {
        return Vec::new();
    };

    let rest = tokens[size_idx + 1..].join(" ");
    // `14px / 1.5 Inter` leaves the line height at the front
    let rest = strip_detached_line_height(&rest);
    if is_non_family_value(rest) {
        return Vec::new();
    }

    split_font_families(rest)
        .into_iter()
        .map(|name| Font::named(name).with_selector(selector))
        .collect()
}

fn strip_detached_line_height(rest: &str) -> &str {
    let Some(after_slash) = rest.strip_prefix('/') else {
        return rest;
    };
    let after_slash = after_slash.trim_start();
    match after_slash.split_once(' ') {
        Some((_, families)) => families,
        None => "",
    }
}
