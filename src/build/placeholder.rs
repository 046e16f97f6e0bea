//! Literal placeholder substitution.

use serde::{Deserialize, Serialize};

/// The token replaced by the build version.
pub const VERSION_TOKEN: &str = "{{VERSION}}";

/// A single literal token and the text that replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    pub token: String,
    pub value: String,
}

impl Placeholder {
    pub fn new(token: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            value: value.into(),
        }
    }
}

/// An ordered list of placeholders, applied one after another.
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    entries: Vec<Placeholder>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a map with the version token bound to `version`.
    pub fn with_version(version: &str) -> Self {
        let mut placeholders = Self::new();
        placeholders.push(Placeholder::new(VERSION_TOKEN, version));
        placeholders
    }

    pub fn push(&mut self, placeholder: Placeholder) -> &mut Self {
        self.entries.push(placeholder);
        self
    }

    pub fn extend(&mut self, placeholders: impl IntoIterator<Item = Placeholder>) -> &mut Self {
        self.entries.extend(placeholders);
        self
    }

    /// Replace every occurrence of every token, in insertion order.
    ///
    /// Matching is literal and non-overlapping, scanning left to right. Later
    /// entries see the output of earlier ones. Entries with an empty token are
    /// skipped.
    pub fn apply(&self, text: &str) -> String {
        self.entries
            .iter()
            .filter(|p| !p.token.is_empty())
            .fold(text.to_string(), |text, p| text.replace(&p.token, &p.value))
    }
}
