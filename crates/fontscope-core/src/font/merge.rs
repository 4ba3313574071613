//! Identity-keyed font deduplication.

use super::{Font, FontKey, push_unique};
use std::collections::HashMap;

/// Merge fonts sharing a [`FontKey`] into one entry each.
///
/// Keys keep their first-seen order. Weights, styles and selectors are
/// unioned, `face_data` is overlaid with later keys winning, and the
/// optional scalars (`format`, `provider`, `unicode_range`) keep the first
/// value that was set. Merging an already merged list returns it unchanged.
pub fn merge_fonts(fonts: impl IntoIterator<Item = Font>) -> Vec<Font> {
    let mut merged: Vec<Font> = Vec::new();
    let mut index: HashMap<FontKey, usize> = HashMap::new();

    for font in fonts {
        let key = font.key();
        match index.get(&key).copied() {
            Some(slot) => absorb(&mut merged[slot], font),
            None => {
                index.insert(key, merged.len());
                merged.push(font);
            }
        }
    }

    merged
}

fn absorb(target: &mut Font, other: Font) {
    for weight in other.weights {
        push_unique(&mut target.weights, weight);
    }
    for style in other.styles {
        push_unique(&mut target.styles, style);
    }
    for selector in other.selectors {
        push_unique(&mut target.selectors, selector);
    }
    target.face_data.extend(other.face_data);

    if target.format.is_none() {
        target.format = other.format;
    }
    if target.provider.is_none() {
        target.provider = other.provider;
    }
    if target.unicode_range.is_none() {
        target.unicode_range = other.unicode_range;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontKind;
    use crate::provider::Provider;
    use std::collections::BTreeSet;

    fn sample() -> Vec<Font> {
        vec![
            Font::new("Inter", FontKind::Web)
                .with_source("https://cdn.test/inter.woff2")
                .with_weight("400")
                .with_selector("@font-face"),
            Font::named("Arial").with_selector("body"),
            Font::new("Inter", FontKind::Web)
                .with_source("https://cdn.test/inter.woff2")
                .with_weight("700")
                .with_style("italic")
                .with_format("woff2"),
            Font::named("Inter").with_selector("h1"),
            Font::named("Arial").with_selector("p").with_weight("700"),
        ]
    }

    fn as_sets(fonts: &[Font]) -> Vec<(FontKey, BTreeSet<String>, BTreeSet<String>, BTreeSet<String>)> {
        let mut rows: Vec<_> = fonts
            .iter()
            .map(|f| {
                (
                    f.key(),
                    f.weights.iter().cloned().collect(),
                    f.styles.iter().cloned().collect(),
                    f.selectors.iter().cloned().collect(),
                )
            })
            .collect();
        rows.sort_by(|a, b| format!("{:?}", a.0).cmp(&format!("{:?}", b.0)));
        rows
    }

    #[test]
    fn merges_by_identity_key() {
        let merged = merge_fonts(sample());

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].name, "Inter");
        assert_eq!(merged[0].kind, FontKind::Web);
        assert_eq!(merged[0].weights, vec!["400", "700"]);
        assert_eq!(merged[0].styles, vec!["italic"]);
        assert_eq!(merged[0].format.as_deref(), Some("woff2"));
        assert_eq!(merged[1].name, "Arial");
        assert_eq!(merged[1].selectors, vec!["body", "p"]);
        assert_eq!(merged[2].kind, FontKind::Custom);
    }

    #[test]
    fn merge_is_idempotent() {
        let once = merge_fonts(sample());
        let twice = merge_fonts(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_is_permutation_independent() {
        let forward = merge_fonts(sample());
        let mut reversed_input = sample();
        reversed_input.reverse();
        let reversed = merge_fonts(reversed_input);

        assert_eq!(as_sets(&forward), as_sets(&reversed));
    }

    #[test]
    fn face_data_later_wins_and_scalars_first_wins() {
        let mut first = Font::new("Inter", FontKind::Web)
            .with_source("/inter.woff2")
            .with_provider(Some(Provider::Custom));
        first.face_data.insert("font-display".into(), "swap".into());
        first.face_data.insert("font-weight".into(), "400".into());

        let mut second = Font::new("Inter", FontKind::Web)
            .with_source("/inter.woff2")
            .with_provider(Some(Provider::GoogleFonts));
        second.face_data.insert("font-weight".into(), "700".into());
        second.unicode_range = Some("U+0000-00FF".into());

        let merged = merge_fonts(vec![first, second]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].face_data["font-display"], "swap");
        assert_eq!(merged[0].face_data["font-weight"], "700");
        assert_eq!(merged[0].provider, Some(Provider::Custom));
        assert_eq!(merged[0].unicode_range.as_deref(), Some("U+0000-00FF"));
    }

    #[test]
    fn empty_input() {
        assert!(merge_fonts(Vec::new()).is_empty());
    }
}
