//! Background images.
//!
//! | images | `alt` | result |
//! |---|---|---|
//! | 1 | empty | `background-image` data attribute |
//! | 1 | `fit` | `background-image` + `background-size: contain` data attributes |
//! | 1 | `50%` | centered, non-repeating background at that size |
//! | 1 | `left` / `right` | half-width background, text padded to the other half |
//! | 2 | any | side-by-side backgrounds |
//! | 3+ | any | three columns from the first three images |
//!
//! Layout keywords are compared against the whole `alt`. An `alt` containing
//! `original` suppresses the legibility overlay.

use std::sync::LazyLock;

use deckset_config::ImagesConfig;
use regex::Regex;
use tracing::debug;

use super::{MediaElement, MediaKind, MediaOutput, strip_elements};
use crate::annotation::without_annotations;
use crate::html::strip_tags;

/// Optional leading word, then a trailing percentage: `50%`, `fill 80%`.
static PERCENTAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w*?\s*(?P<percentage>\d+%)$").unwrap());

const INLINE: &str = "inline";
const ORIGINAL: &str = "original";

/// Layout chosen for a slide with a single image.
#[derive(Debug, PartialEq, Eq)]
enum SingleLayout<'a> {
    Background,
    Fit,
    Percentage(&'a str),
    Left,
    Right,
    Unstyled,
}

impl<'a> SingleLayout<'a> {
    /// Classify an image's `alt`. Percentage wins over `left`/`right`.
    fn classify(alt: &'a str) -> Self {
        if alt.is_empty() {
            Self::Background
        } else if alt == "fit" {
            Self::Fit
        } else if let Some(percentage) = PERCENTAGE_RE
            .captures(alt)
            .and_then(|caps| caps.name("percentage"))
        {
            Self::Percentage(percentage.as_str())
        } else if alt == "left" {
            Self::Left
        } else if alt == "right" {
            Self::Right
        } else {
            Self::Unstyled
        }
    }
}

/// Promote inline images to slide backgrounds.
///
/// `images` must be the non-empty result of [`MediaKind::Image`]`.find(content)`.
/// The layout and the `inline`/`original` keywords are read from the first
/// image.
///
/// # Example
///
/// ```
/// use deckset_config::ImagesConfig;
/// use deckset_styles::{MediaKind, process_images};
///
/// let content = r#"<p><img alt="" src="a.png"></p>"#;
/// let images = MediaKind::Image.find(content);
/// let output = process_images(content, &images, &ImagesConfig::default());
///
/// assert_eq!(output.content, "");
/// assert_eq!(output.data, vec![("background-image".to_owned(), "a.png".to_owned())]);
/// assert!(output.style.is_empty());
/// ```
#[must_use]
pub fn process_images(
    content: &str,
    images: &[MediaElement],
    config: &ImagesConfig,
) -> MediaOutput {
    debug_assert!(!images.is_empty(), "process_images called without images");
    let mut output = MediaOutput::unchanged(content);
    let Some(first) = images.first() else {
        debug!("No images to process");
        return output;
    };

    match images {
        [image] => apply_single(&mut output, image),
        [left, right] => {
            output.style.insert(
                "background-image",
                format!("url({}), url({})", left.src, right.src),
            );
            output.style.insert("background-repeat", "no-repeat");
            output.style.insert("background-position", "left, right");
            output.style.insert("background-size", "50% auto, 50% auto");
        }
        [left, center, right, ..] => {
            output.style.insert(
                "background-image",
                format!("url({}), url({}), url({})", left.src, center.src, right.src),
            );
            output.style.insert("background-repeat", "no-repeat");
            output.style.insert("background-position", "left, center, right");
            output
                .style
                .insert("background-size", "33% auto, 33% auto, 33% auto");
        }
        [] => {}
    }

    if first.alt != INLINE {
        output.content = strip_elements(&output.content, MediaKind::Image);
    }

    if has_visible_text(&output.content) && !first.alt.contains(ORIGINAL) {
        output
            .style
            .insert("background-color", config.blend_color.as_str());
        output
            .style
            .insert("background-blend-mode", config.blend_mode.as_str());
    }

    output
}

fn apply_single(output: &mut MediaOutput, image: &MediaElement) {
    let src = image.src.as_str();

    match SingleLayout::classify(&image.alt) {
        SingleLayout::Background => output.set_data("background-image", src),
        SingleLayout::Fit => {
            output.set_data("background-image", src);
            output.set_data("background-size", "contain");
        }
        SingleLayout::Percentage(percentage) => {
            output.style.insert("background-image", format!("url({src})"));
            output.style.insert("background-size", percentage);
            output.style.insert("background-repeat", "no-repeat");
            output.style.insert("background-position", "center");
        }
        SingleLayout::Left => apply_half(output, src, "left"),
        SingleLayout::Right => apply_half(output, src, "right"),
        SingleLayout::Unstyled => {}
    }
}

/// Half-width background on `side`, with the text padded onto the other half.
fn apply_half(output: &mut MediaOutput, src: &str, side: &str) {
    output.style.insert("background-image", format!("url({src})"));
    output.style.insert("background-size", "50%");
    output.style.insert("background-repeat", "no-repeat");
    output
        .style
        .insert("background-position", format!("center {side}"));
    output
        .style
        .insert(format!("padding-{side}"), "50% !important");
}

/// Whether the slide still shows text once media is gone.
fn has_visible_text(content: &str) -> bool {
    let content = without_annotations(content);
    strip_tags(&content).chars().any(char::is_alphanumeric)
}
