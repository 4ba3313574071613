//! Font family name normalization and classification.

/// Family names treated as installed system fonts (lower-case).
const SYSTEM_FONTS: &[&str] = &[
    "arial",
    "helvetica",
    "times",
    "times new roman",
    "courier",
    "courier new",
    "verdana",
    "georgia",
    "palatino",
    "garamond",
    "bookman",
    "comic sans ms",
    "trebuchet ms",
    "arial black",
    "impact",
    "lucida sans unicode",
    "tahoma",
    "lucida console",
    "monaco",
    "bradley hand",
    "brush script mt",
    "luminari",
    "marker felt",
    "papyrus",
    "system-ui",
    "-apple-system",
    "blinkmacsystemfont",
    "segoe ui",
    "roboto",
    "helvetica neue",
    "arial unicode ms",
    "avenir",
    "menlo",
    "consolas",
    "dejavu sans",
    "liberation sans",
    "noto sans",
    "droid sans",
    "cantarell",
    "oxygen",
    "ubuntu",
    "franklin gothic medium",
    "century gothic",
    "calibri",
    "cambria",
    "optima",
    "gill sans",
    "futura",
    "avant garde",
];

/// CSS generic family keywords.
const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
];

/// CSS-wide keywords that can appear where a family list is expected.
const CSS_WIDE_KEYWORDS: &[&str] = &["inherit", "initial", "unset", "revert", "revert-layer"];

/// Normalize a raw family name.
///
/// Trims surrounding whitespace, removes one pair of matching quotes and
/// collapses internal whitespace runs. An empty result means "no font".
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = strip_matching_quotes(trimmed);
    collapse_whitespace(unquoted)
}

/// Whether `name` is one of the known system fonts (exact, case-insensitive).
pub fn is_system_font(name: &str) -> bool {
    let name = normalize(name);
    !name.is_empty() && SYSTEM_FONTS.iter().any(|s| s.eq_ignore_ascii_case(&name))
}

/// Whether `name` is a CSS generic family keyword such as `sans-serif`.
pub fn is_generic_family(name: &str) -> bool {
    let name = name.trim();
    GENERIC_FAMILIES.iter().any(|g| g.eq_ignore_ascii_case(name))
}

/// Whether `value` is a CSS-wide keyword or a custom property reference
/// rather than a family name.
pub(crate) fn is_non_family_value(value: &str) -> bool {
    let value = value.trim();
    CSS_WIDE_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(value))
        || value.to_ascii_lowercase().starts_with("var(")
}

/// Map the `normal` / `bold` keywords to their numeric weights.
pub(crate) fn normalize_weight(token: &str) -> String {
    let token = token.trim();
    if token.eq_ignore_ascii_case("normal") {
        "400".to_string()
    } else if token.eq_ignore_ascii_case("bold") {
        "700".to_string()
    } else {
        token.to_ascii_lowercase()
    }
}

/// Remove one pair of surrounding quotes if both ends carry the same quote.
pub(crate) fn strip_matching_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' || first == b'\'') && first == last {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Collapse whitespace runs into single spaces and trim the ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
