//! Shortcode annotation extraction.
//!
//! Annotations are bracketed directives authored inline in slide markdown:
//! `[.header: #ff0000, alignment(center)]`. They survive markdown rendering
//! as plain text and are removed from the slide content here.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// `[.property: value]`, value running to the last `]` on the line.
static ANNOTATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)\[\.(?P<property>[a-zA-Z0-9_-]+)?:(?P<value>.*)\]").unwrap()
});

/// One shortcode annotation found in slide content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Annotation {
    /// Property name between `[.` and `:` (empty if omitted).
    pub property: String,
    /// Raw value text after `:`, untrimmed.
    pub value: String,
    /// Exact matched text, as removed from the content.
    pub matched: String,
}

/// Extract annotations in order of occurrence and remove them from `content`.
///
/// Every matched annotation is removed exactly once, recognized property or
/// not. Content without annotations is left untouched.
///
/// # Example
///
/// ```
/// use deckset_styles::extract_annotations;
///
/// let mut content = "<p>[.text: #fff]</p>\n<h1>Hello</h1>".to_owned();
/// let annotations = extract_annotations(&mut content);
///
/// assert_eq!(annotations.len(), 1);
/// assert_eq!(annotations[0].property, "text");
/// assert_eq!(annotations[0].value, " #fff");
/// assert_eq!(content, "<p></p>\n<h1>Hello</h1>");
/// ```
pub fn extract_annotations(content: &mut String) -> Vec<Annotation> {
    let annotations: Vec<Annotation> = ANNOTATION_RE
        .captures_iter(content)
        .map(|caps| Annotation {
            property: caps
                .name("property")
                .map_or_else(String::new, |m| m.as_str().to_owned()),
            value: caps
                .name("value")
                .map_or_else(String::new, |m| m.as_str().to_owned()),
            matched: caps[0].to_owned(),
        })
        .collect();

    for annotation in &annotations {
        if let Some(pos) = content.find(&annotation.matched) {
            content.replace_range(pos..pos + annotation.matched.len(), "");
        }
    }

    annotations
}

/// Content with every annotation blanked out, for visible-text checks.
pub(crate) fn without_annotations(content: &str) -> Cow<'_, str> {
    ANNOTATION_RE.replace_all(content, "")
}
