//! Declaration block to property map.

use super::split_top_level;
use crate::font::name::{collapse_whitespace, strip_matching_quotes};
use std::collections::BTreeMap;

/// Extract `property: value` pairs from a declaration block body.
///
/// Keys are trimmed and lower-cased. Values have whitespace collapsed and,
/// when the whole value is one quoted string, its quotes removed. Segments
/// without a `:` or with an empty key or value are dropped. The last
/// duplicate wins.
pub fn extract_properties(block: &str) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();

    for declaration in split_top_level(block, ';') {
        let Some((key, value)) = declaration.split_once(':') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = clean_value(value);
        if key.is_empty() || value.is_empty() {
            continue;
        }
        properties.insert(key, value);
    }

    properties
}

fn clean_value(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw);
    if is_single_quoted_string(&collapsed) {
        strip_matching_quotes(&collapsed).to_string()
    } else {
        collapsed
    }
}

/// `"Foo Bar"` is one string; `"Foo", "Bar"` is not.
fn is_single_quoted_string(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(open) = chars.next() else {
        return false;
    };
    if (open != '"' && open != '\'') || value.len() < 2 || !value.ends_with(open) {
        return false;
    }
    let inner = &value[1..value.len() - 1];
    !inner.contains(open)
}
