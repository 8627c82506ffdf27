//! Accumulating string-list value.
//!
//! Every set splits its input on `,`, trims each token, and appends all of
//! them. Because the document pass and the environment pass each set the
//! same slot, list values merge across layers instead of replacing.

use std::fmt;

use crate::constants::LIST_SEPARATOR;

/// Ordered sequence of strings; duplicates and order are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringList(Vec<String>);

impl StringList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append every comma-separated, whitespace-trimmed token of `raw`.
    ///
    /// Empty tokens are kept, so `""` appends one empty element.
    pub fn set(&mut self, raw: &str) {
        self.0
            .extend(raw.split(LIST_SEPARATOR).map(|token| token.trim().to_string()));
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for StringList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

impl<'a> IntoIterator for &'a StringList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Diagnostic form only, e.g. `["a", "b"]`.
impl fmt::Display for StringList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
