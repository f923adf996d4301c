//! Per-slide orchestration.
//!
//! Media runs before annotations: a `background-color` annotation must see
//! the `background-image`/`background-video` attributes media handling sets.

use std::collections::HashMap;

use deckset_config::Config;
use rayon::prelude::*;
use tracing::debug;

use crate::annotation::extract_annotations;
use crate::directive::{Directive, DirectiveContext};
use crate::media::{MediaKind, MediaOutput, process_audio, process_images, process_videos};
use crate::registry::StyleRegistry;

/// One slide of a deck: its identifier and rendered HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Slide {
    pub id: String,
    pub content: String,
}

impl Slide {
    #[must_use]
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}

/// Interprets Deckset annotations and inline media on rendered slides.
///
/// Holds only immutable configuration, so one interpreter can serve many
/// threads.
///
/// # Example
///
/// ```
/// use deckset_config::Config;
/// use deckset_styles::{MemoryStyleRegistry, SlideInterpreter, StyleRegistry};
///
/// let interpreter = SlideInterpreter::new(Config::default());
/// let registry = MemoryStyleRegistry::new();
///
/// let content = "<p><img alt=\"\" src=\"bg.jpg\"></p>\n<p>[.background-color: #000]</p>";
/// let output = interpreter.interpret(content, "cover", &registry);
///
/// assert_eq!(output, "\n<p></p>");
/// assert_eq!(
///     registry.data_attribute("cover", "background-color"),
///     Some("#000".to_owned())
/// );
/// ```
#[derive(Debug, Default)]
pub struct SlideInterpreter {
    config: Config,
}

impl SlideInterpreter {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Interpret one slide and return its rewritten content.
    ///
    /// Styling side effects land in `registry` under `slide_id`. Never
    /// fails: content without media or annotations comes back unchanged.
    pub fn interpret(&self, content: &str, slide_id: &str, registry: &dyn StyleRegistry) -> String {
        let mut content = content.to_owned();

        let images = MediaKind::Image.find(&content);
        if !images.is_empty() {
            let output = process_images(&content, &images, &self.config.images);
            content = register_media(slide_id, output, registry);
        }

        let videos = MediaKind::Video.find(&content);
        if !videos.is_empty() {
            let output = process_videos(&content, &videos);
            content = register_media(slide_id, output, registry);
        }

        let audios = MediaKind::Audio.find(&content);
        if !audios.is_empty() {
            content = process_audio(&content, &audios, &self.config.audio);
        }

        let annotations = extract_annotations(&mut content);
        debug!(
            slide = slide_id,
            images = images.len(),
            videos = videos.len(),
            audios = audios.len(),
            annotations = annotations.len(),
            "Interpreting slide"
        );

        let ctx = DirectiveContext {
            slide_id,
            registry,
            config: &self.config,
        };
        for annotation in &annotations {
            match Directive::from_property(&annotation.property) {
                Some(directive) => directive.apply(&annotation.value, &mut content, &ctx),
                None => debug!(
                    slide = slide_id,
                    property = %annotation.property,
                    "Ignoring unrecognized annotation"
                ),
            }
        }

        content
    }

    /// Interpret a whole deck, slides in parallel.
    ///
    /// Output order matches input order. Slides sharing an identifier are
    /// interpreted one after another, in input order, on the same thread.
    pub fn interpret_deck(&self, slides: Vec<Slide>, registry: &dyn StyleRegistry) -> Vec<Slide> {
        let groups = group_by_id(&slides);

        let rewritten: Vec<Vec<(usize, String)>> = groups
            .par_iter()
            .map(|indices| {
                indices
                    .iter()
                    .map(|&index| {
                        let slide = &slides[index];
                        (index, self.interpret(&slide.content, &slide.id, registry))
                    })
                    .collect()
            })
            .collect();

        let mut slides = slides;
        for (index, content) in rewritten.into_iter().flatten() {
            slides[index].content = content;
        }
        slides
    }
}

/// Indices of slides grouped by identifier, groups in first-seen order.
fn group_by_id(slides: &[Slide]) -> Vec<Vec<usize>> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (index, slide) in slides.iter().enumerate() {
        match positions.get(slide.id.as_str()) {
            Some(&group) => groups[group].push(index),
            None => {
                positions.insert(&slide.id, groups.len());
                groups.push(vec![index]);
            }
        }
    }
    groups
}

/// Send a media handler's styling to the registry, returning its content.
fn register_media(slide_id: &str, output: MediaOutput, registry: &dyn StyleRegistry) -> String {
    if !output.style.is_empty() {
        registry.set_style(slide_id, &output.style.to_block(), None);
    }
    for (name, value) in &output.data {
        registry.set_data_attribute(slide_id, name, value);
    }
    output.content
}

/// Interpret one slide with the default configuration.
///
/// Convenience wrapper around [`SlideInterpreter::interpret`].
pub fn interpret_annotations(
    content: &str,
    slide_id: &str,
    registry: &dyn StyleRegistry,
) -> String {
    SlideInterpreter::default().interpret(content, slide_id, registry)
}
