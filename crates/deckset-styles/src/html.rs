//! Minimal HTML scanning for slide content.
//!
//! Slide content is rendered HTML that is otherwise treated as opaque text.
//! Only the few elements the interpreter rewrites (media tags, list items)
//! are located, and only their opening-tag attributes are parsed.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Attribute list of an opening tag, tolerating `>` inside quoted values.
const ATTRS: &str = r#"((?:[^>"']|"[^"]*"|'[^']*')*)"#;

/// Any tag, for visible-text detection.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Character references (`&nbsp;`, `&#160;`).
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&#?\w+;").unwrap());

/// Build a regex matching an opening tag `<name ...>`.
///
/// Group 1 is the raw attribute text.
pub(crate) fn open_tag_regex(name: &str) -> Regex {
    Regex::new(&format!(r"(?i)<{name}\b{ATTRS}>")).unwrap()
}

/// Build a regex matching a whole element `<name ...>...</name>`.
///
/// Group 1 is the raw attribute text, group 2 the element body.
pub(crate) fn element_regex(name: &str) -> Regex {
    Regex::new(&format!(r"(?is)<{name}\b{ATTRS}>(.*?)</{name}\s*>")).unwrap()
}

/// One parsed attribute of an opening tag.
///
/// `span` is relative to the attribute text it was parsed from.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Attribute<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
    pub span: Range<usize>,
}

/// Parse `key="value"`, `key='value'`, `key=value` and bare `key` attributes.
pub(crate) fn parse_attributes(s: &str) -> Vec<Attribute<'_>> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut attributes = Vec::new();
    let mut i = 0;

    while i < len {
        if bytes[i].is_ascii_whitespace() || bytes[i] == b'/' {
            i += 1;
            continue;
        }

        let start = i;
        while i < len
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'/' | b'>')
        {
            i += 1;
        }
        if i == start {
            // Stray `=` or `>`
            i += 1;
            continue;
        }
        let name = &s[start..i];

        let mut j = skip_whitespace(bytes, i);
        if j < len && bytes[j] == b'=' {
            j = skip_whitespace(bytes, j + 1);
            let value;
            if j < len && (bytes[j] == b'"' || bytes[j] == b'\'') {
                let quote = bytes[j] as char;
                let value_start = j + 1;
                if let Some(offset) = s[value_start..].find(quote) {
                    value = &s[value_start..value_start + offset];
                    i = value_start + offset + 1;
                } else {
                    value = &s[value_start..];
                    i = len;
                }
            } else {
                let value_start = j;
                while j < len && !bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                value = &s[value_start..j];
                i = j;
            }
            attributes.push(Attribute {
                name,
                value: Some(value),
                span: start..i,
            });
        } else {
            attributes.push(Attribute {
                name,
                value: None,
                span: start..i,
            });
        }
    }

    attributes
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Find an attribute by case-insensitive name.
pub(crate) fn find_attribute<'a, 'b>(
    attributes: &'b [Attribute<'a>],
    name: &str,
) -> Option<&'b Attribute<'a>> {
    attributes
        .iter()
        .find(|attr| attr.name.eq_ignore_ascii_case(name))
}

/// Value of an attribute; bare attributes yield `""`.
pub(crate) fn attribute_value<'a>(attributes: &[Attribute<'a>], name: &str) -> Option<&'a str> {
    find_attribute(attributes, name).map(|attr| attr.value.unwrap_or(""))
}

/// Widen `span` to cover wrapper elements that contain nothing else.
///
/// An image inside `<a href="...">` inside `<p>` is removed together with
/// both wrappers. Wrappers holding other content are left in place.
pub(crate) fn wrapper_span(content: &str, span: Range<usize>) -> Range<usize> {
    let Range { mut start, mut end } = span;

    loop {
        let before = content[..start].trim_end();
        let after = &content[end..];
        let after_trimmed = after.trim_start();

        let Some((open_start, name)) = trailing_open_tag(before) else {
            break;
        };
        let Some(close_len) = leading_close_tag(after_trimmed, name) else {
            break;
        };

        start = open_start;
        end += (after.len() - after_trimmed.len()) + close_len;
    }

    start..end
}

/// If `before` ends with an opening `<a ...>` or `<p ...>` tag, return its
/// start offset and name.
fn trailing_open_tag(before: &str) -> Option<(usize, &'static str)> {
    if !before.ends_with('>') {
        return None;
    }
    let open_start = before.rfind('<')?;
    let tag = &before[open_start + 1..before.len() - 1];
    let name_len = tag
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(tag.len());
    let name = &tag[..name_len];

    ["a", "p"]
        .into_iter()
        .find(|wrapper| name.eq_ignore_ascii_case(wrapper))
        .map(|wrapper| (open_start, wrapper))
}

/// If `after` starts with `</name>`, return the closing tag's length.
fn leading_close_tag(after: &str, name: &str) -> Option<usize> {
    let rest = after.strip_prefix("</")?;
    let name_part = rest.get(..name.len())?;
    if !name_part.eq_ignore_ascii_case(name) {
        return None;
    }
    let tail = &rest[name.len()..];
    let trimmed = tail.trim_start();
    trimmed.starts_with('>').then(|| {
        2 + name.len() + (tail.len() - trimmed.len()) + 1
    })
}

/// Text left once tags and character references are removed.
pub(crate) fn strip_tags(content: &str) -> Cow<'_, str> {
    match TAG_RE.replace_all(content, " ") {
        Cow::Borrowed(text) => ENTITY_RE.replace_all(text, " "),
        Cow::Owned(text) => Cow::Owned(ENTITY_RE.replace_all(&text, " ").into_owned()),
    }
}

/// Escape a string for use inside a double-quoted HTML attribute.
pub(crate) fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
