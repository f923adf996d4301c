//! Deckset slide annotations to per-slide CSS and data attributes.
//!
//! Slides written in the Deckset dialect carry their styling inline: bracketed
//! annotations such as `[.header: #ff0000, alignment(center)]` and images or
//! videos whose `alt` text selects a background layout. This crate takes the
//! rendered HTML of one slide, strips those constructs out and records the
//! styling they imply in a [`StyleRegistry`] under the slide's identifier.
//!
//! # Architecture
//!
//! Processing one slide runs in a fixed order:
//!
//! 1. **Media** ([`process_images`], [`process_videos`], [`process_audio`]):
//!    inline media become background styles and data attributes, or get
//!    playback attributes injected.
//! 2. **Annotations** ([`extract_annotations`]): shortcodes are pulled out of
//!    the content in order of occurrence.
//! 3. **Directives** ([`Directive`]): each recognized property parses its
//!    value ([`parse_generic_clauses`], [`parse_list_clauses`]) and writes to
//!    the registry.
//!
//! [`SlideInterpreter`] sequences the three steps; [`MemoryStyleRegistry`]
//! collects the results and renders a scoped stylesheet.
//!
//! # Example
//!
//! ```
//! use deckset_styles::{MemoryStyleRegistry, interpret_annotations};
//!
//! let registry = MemoryStyleRegistry::new();
//! let content = "<p>[.header: #ff0000, alignment(center)]</p>\n<h1>Welcome</h1>";
//!
//! let output = interpret_annotations(content, "intro", &registry);
//!
//! assert_eq!(output, "<p></p>\n<h1>Welcome</h1>");
//! assert_eq!(
//!     registry.stylesheet(),
//!     "#intro h1,#intro h2,#intro h3,#intro h4,#intro h5,#intro h6 \
//!      {\ncolor: #ff0000;text-align: center;\n}\n"
//! );
//! ```

mod annotation;
mod clause;
mod css;
mod directive;
mod html;
mod interpreter;
mod media;
mod registry;
mod splice;

pub use annotation::{Annotation, extract_annotations};
pub use clause::{parse_generic_clauses, parse_list_clauses};
pub use css::{StyleDeclarations, css_block};
pub use directive::{Directive, DirectiveContext, build_lists};
pub use interpreter::{Slide, SlideInterpreter, interpret_annotations};
pub use media::{
    MediaElement, MediaKind, MediaOutput, process_audio, process_images, process_videos,
};
pub use registry::{MemoryStyleRegistry, StyleRegistry};
