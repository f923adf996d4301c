//! Single-pass span replacement for content rewrites.
//!
//! Collects edits against byte ranges of the original content and applies
//! them in one pass.

use std::ops::Range;

/// Collects span edits for single-pass application.
///
/// Handlers that rewrite several tags register one edit per tag against the
/// untouched content, then [`apply()`](Self::apply) rebuilds the string once.
/// Spans must not overlap; an empty span is a pure insertion.
#[derive(Debug, Default)]
pub(crate) struct Splices {
    items: Vec<(Range<usize>, String)>,
}

impl Splices {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replace the bytes in `span` with `to`.
    pub(crate) fn replace(&mut self, span: Range<usize>, to: impl Into<String>) {
        self.items.push((span, to.into()));
    }

    /// Insert `text` at byte offset `at`.
    pub(crate) fn insert(&mut self, at: usize, text: impl Into<String>) {
        self.replace(at..at, text);
    }

    /// Apply all registered edits to `content`.
    ///
    /// Consumes the splices to prevent reuse against rewritten content.
    pub(crate) fn apply(mut self, content: &str) -> String {
        if self.items.is_empty() {
            return content.to_owned();
        }

        self.items.sort_by_key(|(span, _)| span.start);

        let extra: usize = self.items.iter().map(|(_, to)| to.len()).sum();
        let mut result = String::with_capacity(content.len() + extra);
        let mut cursor = 0;
        for (span, to) in self.items {
            debug_assert!(span.start >= cursor, "overlapping splice at {}", span.start);
            result.push_str(&content[cursor..span.start]);
            result.push_str(&to);
            cursor = span.end;
        }
        result.push_str(&content[cursor..]);
        result
    }
}
