//! CSS declaration sets and rule-block serialization.
//!
//! Blocks use the compact form the slide stylesheet has always carried:
//! declarations concatenated without separators, each terminated by `;`,
//! wrapped as `{\n...\n}`.

/// Ordered mapping from CSS property to value.
///
/// Insertion order is preserved. Inserting an existing property overwrites
/// its value in place, keeping the original position.
///
/// # Example
///
/// ```
/// use deckset_styles::StyleDeclarations;
///
/// let mut decls = StyleDeclarations::new();
/// decls.insert("color", "#fff");
/// decls.insert("text-align", "center");
/// decls.insert("color", "#000");
///
/// assert_eq!(decls.to_css_string(), "color: #000;text-align: center;");
/// assert_eq!(decls.to_block(), "{\ncolor: #000;text-align: center;\n}");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleDeclarations {
    entries: Vec<(String, String)>,
}

impl StyleDeclarations {
    /// Create an empty declaration set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `property` to `value`, overwriting any earlier value.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    /// Get the value for `property`.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(property, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Serialize as `prop: value;prop: value;`.
    #[must_use]
    pub fn to_css_string(&self) -> String {
        let mut css = String::new();
        for (property, value) in &self.entries {
            css.push_str(property);
            css.push_str(": ");
            css.push_str(value);
            css.push(';');
        }
        css
    }

    /// Serialize as a brace-delimited rule body.
    #[must_use]
    pub fn to_block(&self) -> String {
        css_block(&self.to_css_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleDeclarations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut decls = Self::new();
        for (property, value) in iter {
            decls.insert(property, value);
        }
        decls
    }
}

/// Wrap already-serialized declarations in a rule body.
#[must_use]
pub fn css_block(declarations: &str) -> String {
    format!("{{\n{declarations}\n}}")
}
