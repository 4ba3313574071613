//! CSS parsing: declaration blocks, `@font-face` sources, family lists,
//! the `font` shorthand and whole stylesheets.

mod css_parser;
mod error;
mod family;
mod properties;
mod shorthand;
mod src;

pub use css_parser::{
    CssParseOutcome, INLINE_STYLE_SELECTOR, extract_imports, parse_css, parse_inline_style,
};
pub use error::ParseError;
pub use family::split_font_families;
pub use properties::extract_properties;
pub use shorthand::parse_font_shorthand;
pub use src::{FontSource, parse_font_face_src};

/// Split `input` on `delimiter` where it appears outside quotes and
/// parentheses. Backslash escapes are honoured inside and outside quotes.
pub(crate) fn split_top_level(input: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut paren_depth = 0_i32;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, ch) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' | '\'' => match quote {
                Some(q) if q == ch => quote = None,
                None => quote = Some(ch),
                Some(_) => {}
            },
            '(' if quote.is_none() => paren_depth += 1,
            ')' if quote.is_none() => paren_depth = (paren_depth - 1).max(0),
            c if c == delimiter && quote.is_none() && paren_depth == 0 => {
                parts.push(&input[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}
