//! Value sub-grammar parsers for annotation values.
//!
//! An annotation value is a comma-separated list of clauses. Each clause is
//! trimmed and classified on its own; later clauses overwrite earlier ones
//! that map to the same CSS property. Clauses that fit no rule are dropped.
//!
//! ```text
//! #ff0000, alignment(center), line-height(1.4), text-scale(2), Avenir Next
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::css::StyleDeclarations;

/// Parenthesized sub-value, greedy up to the last `)`.
static BRACKET_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((?P<value>.*)\)").unwrap());

/// Leading decimal number, the way a lenient numeric cast reads it.
static NUMBER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
});

/// Parse a generic text-style value (`text`, `header`, `code`, ...).
///
/// | clause | property |
/// |---|---|
/// | `#...` | `color` (verbatim) |
/// | `alignment(x)` | `text-align: x` |
/// | `line-height(x)` | `line-height: x` |
/// | `text-scale(n)` | `font-size: {base_font_size * n}px` |
/// | word-like text | `font-family` (verbatim) |
///
/// # Example
///
/// ```
/// use deckset_styles::parse_generic_clauses;
///
/// let decls = parse_generic_clauses("#ff0000, alignment(center), text-scale(2)", 16.0);
/// assert_eq!(decls.get("color"), Some("#ff0000"));
/// assert_eq!(decls.get("text-align"), Some("center"));
/// assert_eq!(decls.get("font-size"), Some("32px"));
/// ```
pub fn parse_generic_clauses(value: &str, base_font_size: f64) -> StyleDeclarations {
    let mut decls = StyleDeclarations::new();

    for piece in value.split(',').map(str::trim) {
        if piece.starts_with('#') {
            decls.insert("color", piece);
        } else if piece.starts_with("alignment") {
            if let Some(align) = bracket_value(piece) {
                decls.insert("text-align", align);
            }
        } else if piece.starts_with("line-height") {
            if let Some(height) = bracket_value(piece) {
                decls.insert("line-height", height);
            }
        } else if piece.starts_with("text-scale") {
            if let Some(scale) = bracket_value(piece).and_then(parse_number_prefix) {
                decls.insert("font-size", format!("{}px", base_font_size * scale));
            }
        } else if starts_with_word(piece) {
            decls.insert("font-family", piece);
        }
    }

    decls
}

/// Parse a `list` value.
///
/// Recognizes `#...` (`color`), `alignment(x)` (`text-align`) and
/// `bullet-character(x)` (`list-style-type`). Anything else is dropped.
pub fn parse_list_clauses(value: &str) -> StyleDeclarations {
    let mut decls = StyleDeclarations::new();

    for piece in value.split(',').map(str::trim) {
        if piece.starts_with('#') {
            decls.insert("color", piece);
        } else if piece.starts_with("alignment") {
            if let Some(align) = bracket_value(piece) {
                decls.insert("text-align", align);
            }
        } else if piece.starts_with("bullet-character") {
            if let Some(bullet) = bracket_value(piece) {
                decls.insert("list-style-type", bullet);
            }
        }
    }

    decls
}

/// Text inside the parentheses of `name(value)`.
fn bracket_value(piece: &str) -> Option<&str> {
    BRACKET_VALUE_RE
        .captures(piece)
        .and_then(|caps| caps.name("value"))
        .map(|m| m.as_str())
}

fn parse_number_prefix(s: &str) -> Option<f64> {
    NUMBER_PREFIX_RE
        .find(s)
        .and_then(|m| m.as_str().trim().parse().ok())
}

fn starts_with_word(piece: &str) -> bool {
    piece.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
