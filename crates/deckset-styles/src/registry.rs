//! Style registry trait and in-memory implementation.
//!
//! The registry collects per-slide CSS rules and data attributes while slides
//! are interpreted. The page pipeline later turns it into a stylesheet and
//! slide-element attributes.
//!
//! Entries are partitioned by slide identifier, so distinct slides can be
//! interpreted concurrently against one registry.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::html::escape_html;

/// Sink for per-slide styling side effects.
///
/// Methods take `&self`; implementations provide interior mutability with at
/// least per-call atomicity so that slides can be processed in parallel.
pub trait StyleRegistry: Send + Sync {
    /// Register a rule body (`{\n...\n}`) for the slide.
    ///
    /// `selector` is relative to the slide element; `None` targets the slide
    /// element itself.
    fn set_style(&self, slide_id: &str, block: &str, selector: Option<&str>);

    /// Set a data attribute (without the `data-` prefix) on the slide element.
    fn set_data_attribute(&self, slide_id: &str, name: &str, value: &str);

    /// Get a previously set data attribute.
    fn data_attribute(&self, slide_id: &str, name: &str) -> Option<String>;
}

/// Everything registered for one slide.
#[derive(Debug, Default)]
struct SlideEntry {
    rules: Vec<(Option<String>, String)>,
    data: Vec<(String, String)>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Slide ids in first-seen order.
    order: Vec<String>,
    slides: HashMap<String, SlideEntry>,
}

impl Inner {
    fn entry(&mut self, slide_id: &str) -> &mut SlideEntry {
        if !self.slides.contains_key(slide_id) {
            self.order.push(slide_id.to_owned());
        }
        self.slides.entry(slide_id.to_owned()).or_default()
    }
}

/// In-memory [`StyleRegistry`] that can render a scoped stylesheet.
///
/// Rules accumulate: registering a second block for the same slide and
/// selector keeps both, in call order. Data attributes are overwritten in
/// place.
///
/// # Example
///
/// ```
/// use deckset_styles::{MemoryStyleRegistry, StyleRegistry};
///
/// let registry = MemoryStyleRegistry::new();
/// registry.set_style("intro", "{\ncolor: #fff;\n}", Some("h1,h2"));
/// registry.set_data_attribute("intro", "background-image", "bg.png");
///
/// assert_eq!(
///     registry.stylesheet(),
///     "#intro h1,#intro h2 {\ncolor: #fff;\n}\n"
/// );
/// assert_eq!(
///     registry.data_attribute_markup("intro"),
///     r#" data-background-image="bg.png""#
/// );
/// ```
#[derive(Debug, Default)]
pub struct MemoryStyleRegistry {
    inner: RwLock<Inner>,
}

impl MemoryStyleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered `(selector, block)` pairs for a slide, in call order.
    #[must_use]
    pub fn styles(&self, slide_id: &str) -> Vec<(Option<String>, String)> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .slides
            .get(slide_id)
            .map(|entry| entry.rules.clone())
            .unwrap_or_default()
    }

    /// Data attributes for a slide, in first-set order.
    #[must_use]
    pub fn data_attributes(&self, slide_id: &str) -> Vec<(String, String)> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .slides
            .get(slide_id)
            .map(|entry| entry.data.clone())
            .unwrap_or_default()
    }

    /// Render data attributes as ` data-name="value"` markup.
    #[must_use]
    pub fn data_attribute_markup(&self, slide_id: &str) -> String {
        self.data_attributes(slide_id)
            .iter()
            .map(|(name, value)| format!(r#" data-{name}="{}""#, escape_html(value)))
            .collect()
    }

    /// Render every registered rule, scoped by `#slide-id`.
    ///
    /// Slides appear in first-registration order, rules in call order.
    #[must_use]
    pub fn stylesheet(&self) -> String {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut css = String::new();
        for slide_id in &inner.order {
            let Some(entry) = inner.slides.get(slide_id) else {
                continue;
            };
            for (selector, block) in &entry.rules {
                css.push_str(&scope_selector(slide_id, selector.as_deref()));
                css.push(' ');
                css.push_str(block);
                css.push('\n');
            }
        }
        css
    }
}

impl StyleRegistry for MemoryStyleRegistry {
    fn set_style(&self, slide_id: &str, block: &str, selector: Option<&str>) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner
            .entry(slide_id)
            .rules
            .push((selector.map(str::to_owned), block.to_owned()));
    }

    fn set_data_attribute(&self, slide_id: &str, name: &str, value: &str) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let data = &mut inner.entry(slide_id).data;
        match data.iter_mut().find(|(n, _)| n == name) {
            Some(existing) => value.clone_into(&mut existing.1),
            None => data.push((name.to_owned(), value.to_owned())),
        }
    }

    fn data_attribute(&self, slide_id: &str, name: &str) -> Option<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .slides
            .get(slide_id)?
            .data
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }
}

/// Prefix each selector in a comma-separated list with `#slide-id`.
fn scope_selector(slide_id: &str, selector: Option<&str>) -> String {
    match selector {
        None => format!("#{slide_id}"),
        Some(list) => list
            .split(',')
            .map(|s| format!("#{slide_id} {}", s.trim()))
            .collect::<Vec<_>>()
            .join(","),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    static_assertions::assert_impl_all!(MemoryStyleRegistry: Send, Sync);

    #[test]
    fn test_empty_registry() {
        let registry = MemoryStyleRegistry::new();
        assert_eq!(registry.stylesheet(), "");
        assert!(registry.styles("missing").is_empty());
        assert_eq!(registry.data_attribute("missing", "background-image"), None);
        assert_eq!(registry.data_attribute_markup("missing"), "");
    }

    #[test]
    fn test_rules_accumulate() {
        let registry = MemoryStyleRegistry::new();
        registry.set_style("s1", "{\ncolor: red;\n}", None);
        registry.set_style("s1", "{\nfont-family: Avenir;\n}", None);

        assert_eq!(
            registry.styles("s1"),
            vec![
                (None, "{\ncolor: red;\n}".to_owned()),
                (None, "{\nfont-family: Avenir;\n}".to_owned()),
            ]
        );
    }

    #[test]
    fn test_data_attribute_overwrite_keeps_order() {
        let registry = MemoryStyleRegistry::new();
        registry.set_data_attribute("s1", "background-image", "a.png");
        registry.set_data_attribute("s1", "background-size", "contain");
        registry.set_data_attribute("s1", "background-image", "b.png");

        assert_eq!(
            registry.data_attributes("s1"),
            vec![
                ("background-image".to_owned(), "b.png".to_owned()),
                ("background-size".to_owned(), "contain".to_owned()),
            ]
        );
        assert_eq!(
            registry.data_attribute("s1", "background-image"),
            Some("b.png".to_owned())
        );
    }

    #[test]
    fn test_slides_are_partitioned() {
        let registry = MemoryStyleRegistry::new();
        registry.set_data_attribute("s1", "background-video", "a.mp4");

        assert_eq!(registry.data_attribute("s2", "background-video"), None);
    }

    #[test]
    fn test_stylesheet_scopes_selectors() {
        let registry = MemoryStyleRegistry::new();
        registry.set_style("b", "{\ncolor: #000;\n}", None);
        registry.set_style("a", "{\ncolor: #fff;\n}", Some("ul,ol"));

        assert_eq!(
            registry.stylesheet(),
            "#b {\ncolor: #000;\n}\n#a ul,#a ol {\ncolor: #fff;\n}\n"
        );
    }

    #[test]
    fn test_data_attribute_markup_escapes_values() {
        let registry = MemoryStyleRegistry::new();
        registry.set_data_attribute("s1", "background-image", "a.png?x=1&y=\"2\"");

        assert_eq!(
            registry.data_attribute_markup("s1"),
            r#" data-background-image="a.png?x=1&amp;y=&quot;2&quot;""#
        );
    }

    #[test]
    fn test_scope_selector() {
        assert_eq!(scope_selector("s", None), "#s");
        assert_eq!(scope_selector("s", Some("code,pre")), "#s code,#s pre");
        assert_eq!(scope_selector("s", Some("h1 i, h2 i")), "#s h1 i,#s h2 i");
    }
}
