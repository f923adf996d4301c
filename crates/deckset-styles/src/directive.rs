//! Per-property directive dispatch.
//!
//! Each recognized annotation property maps to one [`Directive`]. Text-style
//! directives share the generic clause grammar and differ only in the
//! selectors they target; `list` has its own grammar; `background-color` and
//! `build-lists` have dedicated behavior.

use std::sync::LazyLock;

use deckset_config::Config;
use regex::Regex;
use tracing::{debug, trace};

use crate::clause::{parse_generic_clauses, parse_list_clauses};
use crate::css::{StyleDeclarations, css_block};
use crate::html::{self, attribute_value, find_attribute, parse_attributes};
use crate::registry::StyleRegistry;
use crate::splice::Splices;

static LI_RE: LazyLock<Regex> = LazyLock::new(|| html::open_tag_regex("li"));

/// Everything a directive needs besides its value.
pub struct DirectiveContext<'a> {
    /// Identifier of the slide being interpreted.
    pub slide_id: &'a str,
    /// Registry receiving styles and data attributes.
    pub registry: &'a dyn StyleRegistry,
    /// Styling configuration.
    pub config: &'a Config,
}

/// A recognized annotation property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Directive {
    Text,
    TextEmphasis,
    TextStrong,
    Header,
    HeaderEmphasis,
    HeaderStrong,
    FooterStyle,
    BackgroundColor,
    List,
    Code,
    Quote,
    BuildLists,
}

impl Directive {
    /// Every directive, in table order.
    pub const ALL: [Self; 12] = [
        Self::Text,
        Self::TextEmphasis,
        Self::TextStrong,
        Self::Header,
        Self::HeaderEmphasis,
        Self::HeaderStrong,
        Self::FooterStyle,
        Self::BackgroundColor,
        Self::List,
        Self::Code,
        Self::Quote,
        Self::BuildLists,
    ];

    /// Look up a directive by property name (case-sensitive).
    ///
    /// ```
    /// use deckset_styles::Directive;
    ///
    /// assert_eq!(Directive::from_property("header"), Some(Directive::Header));
    /// assert_eq!(Directive::from_property("Header"), None);
    /// ```
    #[must_use]
    pub fn from_property(property: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|directive| directive.property() == property)
    }

    /// Property name as written in annotations.
    #[must_use]
    pub fn property(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextEmphasis => "text-emphasis",
            Self::TextStrong => "text-strong",
            Self::Header => "header",
            Self::HeaderEmphasis => "header-emphasis",
            Self::HeaderStrong => "header-strong",
            Self::FooterStyle => "footer-style",
            Self::BackgroundColor => "background-color",
            Self::List => "list",
            Self::Code => "code",
            Self::Quote => "quote",
            Self::BuildLists => "build-lists",
        }
    }

    /// Selectors a style directive registers its block under, one call each.
    ///
    /// `None` is the slide element itself. Directives that don't emit a
    /// parsed declaration block have no selectors.
    #[must_use]
    pub fn selectors(self) -> &'static [Option<&'static str>] {
        match self {
            Self::Text => &[None],
            Self::TextEmphasis => &[Some("i"), Some("em")],
            Self::TextStrong => &[Some("b"), Some("strong")],
            Self::Header => &[Some("h1,h2,h3,h4,h5,h6")],
            Self::HeaderEmphasis => &[
                Some("h1 i,h2 i,h3 i,h4 i,h5 i,h6 i"),
                Some("h1 em,h2 em,h3 em,h4 em,h5 em,h6 em"),
            ],
            Self::HeaderStrong => &[
                Some("h1 b,h2 b,h3 b,h4 b,h5 b,h6 b"),
                Some("h1 strong,h2 strong,h3 strong,h4 strong,h5 strong,h6 strong"),
            ],
            Self::FooterStyle => &[Some("footer")],
            Self::List => &[Some("ul,ol")],
            Self::Code => &[Some("code,pre")],
            Self::Quote => &[Some("blockquote")],
            Self::BackgroundColor | Self::BuildLists => &[],
        }
    }

    /// Apply the directive with its raw annotation value.
    pub fn apply(self, value: &str, content: &mut String, ctx: &DirectiveContext<'_>) {
        trace!(slide = ctx.slide_id, property = self.property(), "Applying directive");

        match self {
            Self::Text
            | Self::TextEmphasis
            | Self::TextStrong
            | Self::Header
            | Self::HeaderEmphasis
            | Self::HeaderStrong
            | Self::FooterStyle
            | Self::Code
            | Self::Quote => {
                let decls = parse_generic_clauses(value, ctx.config.text.base_font_size);
                self.register(&decls, ctx);
            }
            Self::List => self.register(&parse_list_clauses(value), ctx),
            Self::BackgroundColor => apply_background_color(value, ctx),
            Self::BuildLists => {
                if value.trim() == "false" {
                    return;
                }
                *content = build_lists(content, &ctx.config.lists.build_class);
            }
        }
    }

    fn register(self, decls: &StyleDeclarations, ctx: &DirectiveContext<'_>) {
        if decls.is_empty() {
            debug!(
                slide = ctx.slide_id,
                property = self.property(),
                "No recognized clauses"
            );
            return;
        }
        let block = decls.to_block();
        for selector in self.selectors() {
            ctx.registry.set_style(ctx.slide_id, &block, *selector);
        }
    }
}

/// Set the slide background color.
///
/// Over a background image or video the color becomes a data attribute so
/// it composites with the media; otherwise it is a plain CSS declaration.
/// The declaration keeps the value as written, the attribute is trimmed.
fn apply_background_color(value: &str, ctx: &DirectiveContext<'_>) {
    let color = value.trim();
    if color.is_empty() {
        return;
    }

    let has_media = ["background-image", "background-video"]
        .into_iter()
        .any(|name| ctx.registry.data_attribute(ctx.slide_id, name).is_some());

    if has_media {
        ctx.registry
            .set_data_attribute(ctx.slide_id, "background-color", color);
    } else {
        let block = css_block(&format!("background-color:{value};"));
        ctx.registry.set_style(ctx.slide_id, &block, None);
    }
}

/// Add the incremental-reveal class to every list item.
///
/// Items that already carry the class are left alone.
///
/// ```
/// use deckset_styles::build_lists;
///
/// assert_eq!(
///     build_lists("<ul><li>One</li></ul>", "fragment"),
///     r#"<ul><li class="fragment">One</li></ul>"#
/// );
/// ```
#[must_use]
pub fn build_lists(content: &str, class: &str) -> String {
    let mut splices = Splices::new();

    for caps in LI_RE.captures_iter(content) {
        let (Some(whole), Some(attrs_match)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let attrs = parse_attributes(attrs_match.as_str());

        match find_attribute(&attrs, "class") {
            None => splices.insert(attrs_match.start(), format!(r#" class="{class}""#)),
            Some(existing) => {
                let classes = attribute_value(&attrs, "class").unwrap_or("");
                if classes.split_whitespace().any(|c| c == class) {
                    continue;
                }
                let merged = if classes.trim().is_empty() {
                    class.to_owned()
                } else {
                    format!("{} {class}", classes.trim())
                };
                let span = attrs_match.start() + existing.span.start
                    ..attrs_match.start() + existing.span.end;
                splices.replace(span, format!(r#"class="{merged}""#));
            }
        }
        trace!(offset = whole.start(), "Marked list item");
    }

    splices.apply(content)
}
