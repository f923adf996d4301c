//! Inline media detection and background promotion.
//!
//! Images and videos written inline in a slide become slide backgrounds:
//! each handler returns the styling it implies plus the rewritten content.
//! Audio stays inline and only has playback attributes injected.
//!
//! Handlers require at least one element of their kind. Callers check with
//! [`MediaKind::find`] first; an empty slice is a programming error that
//! asserts in debug builds and is a no-op otherwise.

mod audio;
mod image;
mod video;

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::css::StyleDeclarations;
use crate::html::{self, attribute_value, parse_attributes};

pub use audio::process_audio;
pub use image::process_images;
pub use video::process_videos;

static IMG_RE: LazyLock<Regex> = LazyLock::new(|| html::open_tag_regex("img"));
static VIDEO_RE: LazyLock<Regex> = LazyLock::new(|| html::element_regex("video"));
static AUDIO_RE: LazyLock<Regex> = LazyLock::new(|| html::element_regex("audio"));
static SOURCE_RE: LazyLock<Regex> = LazyLock::new(|| html::open_tag_regex("source"));

/// Kind of inline media element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

/// Parsed view of one media element in slide content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MediaElement {
    pub kind: MediaKind,
    /// `alt` attribute (empty for audio without one).
    pub alt: String,
    /// `src` of the element, or of its first nested `<source>`.
    pub src: String,
    /// Byte range of the whole element in the content it was found in.
    pub span: Range<usize>,
    /// Byte range of the opening tag.
    pub open_tag: Range<usize>,
}

impl MediaKind {
    /// Find every element of this kind, in document order.
    ///
    /// Images and videos need both an `alt` and a `src` to be recognized;
    /// every audio element is recognized.
    ///
    /// # Example
    ///
    /// ```
    /// use deckset_styles::MediaKind;
    ///
    /// let content = r#"<p><img src="a.png" alt="fit"><img src="decor.png"></p>"#;
    /// let images = MediaKind::Image.find(content);
    ///
    /// assert_eq!(images.len(), 1);
    /// assert_eq!(images[0].alt, "fit");
    /// assert_eq!(images[0].src, "a.png");
    /// ```
    #[must_use]
    pub fn find(self, content: &str) -> Vec<MediaElement> {
        match self {
            Self::Image => find_images(content),
            Self::Video | Self::Audio => find_elements(self, content),
        }
    }

    fn element_regex(self) -> &'static Regex {
        match self {
            Self::Image => &*IMG_RE,
            Self::Video => &*VIDEO_RE,
            Self::Audio => &*AUDIO_RE,
        }
    }
}

fn find_images(content: &str) -> Vec<MediaElement> {
    IMG_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let attrs = parse_attributes(caps.get(1)?.as_str());
            Some(MediaElement {
                kind: MediaKind::Image,
                alt: attribute_value(&attrs, "alt")?.to_owned(),
                src: attribute_value(&attrs, "src")?.to_owned(),
                span: whole.range(),
                open_tag: whole.range(),
            })
        })
        .collect()
}

fn find_elements(kind: MediaKind, content: &str) -> Vec<MediaElement> {
    kind.element_regex()
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let attrs_match = caps.get(1)?;
            let body = caps.get(2).map_or("", |m| m.as_str());
            let attrs = parse_attributes(attrs_match.as_str());

            let alt = attribute_value(&attrs, "alt");
            let src = attribute_value(&attrs, "src").or_else(|| first_source(body));
            let (alt, src) = match kind {
                MediaKind::Audio => (alt.unwrap_or(""), src.unwrap_or("")),
                _ => (alt?, src?),
            };

            // Opening tag ends at the `>` right after the attribute text.
            let open_tag = whole.start()..attrs_match.end() + 1;
            Some(MediaElement {
                kind,
                alt: alt.to_owned(),
                src: src.to_owned(),
                span: whole.range(),
                open_tag,
            })
        })
        .collect()
}

/// `src` of the first `<source>` inside an element body.
fn first_source(body: &str) -> Option<&str> {
    let caps = SOURCE_RE.captures(body)?;
    let attrs = parse_attributes(caps.get(1)?.as_str());
    attribute_value(&attrs, "src")
}

/// Styling and rewritten content produced by a media handler.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MediaOutput {
    /// Slide content after the handler ran.
    pub content: String,
    /// Declarations for the slide element itself.
    pub style: StyleDeclarations,
    /// Data attributes for the slide element, in order.
    pub data: Vec<(String, String)>,
}

impl MediaOutput {
    fn unchanged(content: &str) -> Self {
        Self {
            content: content.to_owned(),
            ..Self::default()
        }
    }

    fn set_data(&mut self, name: &str, value: &str) {
        match self.data.iter_mut().find(|(n, _)| n == name) {
            Some(existing) => value.clone_into(&mut existing.1),
            None => self.data.push((name.to_owned(), value.to_owned())),
        }
    }
}

/// Remove every recognized element of `kind`, with wrappers left empty.
///
/// Elements are removed one at a time so a paragraph holding several
/// images is dropped once its last image is gone.
fn strip_elements(content: &str, kind: MediaKind) -> String {
    let mut content = content.to_owned();
    while let Some(element) = kind.find(&content).into_iter().next() {
        let span = html::wrapper_span(&content, element.span);
        content.replace_range(span, "");
    }
    content
}
