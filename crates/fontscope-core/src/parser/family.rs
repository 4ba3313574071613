//! `font-family` list splitting.

use crate::font::name::normalize;

/// Split a `font-family` value into normalized family names.
///
/// Commas separate families only outside quotes. An unterminated quote
/// swallows the rest of the input as one family.
pub fn split_font_families(value: &str) -> Vec<String> {
    let mut families = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in value.chars() {
        match (quote, ch) {
            (None, '"' | '\'') => {
                quote = Some(ch);
                current.push(ch);
            }
            (Some(q), c) if c == q => {
                quote = None;
                current.push(ch);
            }
            (None, ',') => {
                push_family(&mut families, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    push_family(&mut families, &current);

    families
}

fn push_family(families: &mut Vec<String>, raw: &str) {
    let name = normalize(raw);
    if !name.is_empty() {
        families.push(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_quoted_names_with_commas() {
        assert_eq!(
            split_font_families("\"Font, With Comma\", Arial"),
            vec!["Font, With Comma", "Arial"]
        );
    }

    #[test]
    fn mixed_quotes() {
        assert_eq!(
            split_font_families("'Open Sans', \"Helvetica Neue\", sans-serif"),
            vec!["Open Sans", "Helvetica Neue", "sans-serif"]
        );
    }

    #[test]
    fn unterminated_quote_takes_rest() {
        assert_eq!(split_font_families("Arial, \"Broken, Font"), vec![
            "Arial",
            "\"Broken, Font"
        ]);
    }

    #[test]
    fn drops_empty_tokens() {
        assert_eq!(split_font_families(" , ,Inter,, "), vec!["Inter"]);
        assert!(split_font_families("").is_empty());
    }
}
