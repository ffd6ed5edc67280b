//! Canonical URL set entity.

use serde::Deserialize;
use std::collections::HashSet;

/// The set of canonical paths loaded from the store.
///
/// Keeps the paths in store order for display alongside a hash index for
/// membership tests. Every canonical path ends with `/`; entries are taken
/// verbatim and never rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct CanonicalUrlSet {
    urls: Vec<String>,
    index: HashSet<String>,
}

impl CanonicalUrlSet {
    /// Builds a set from paths in store order.
    pub fn new(urls: Vec<String>) -> Self {
        let index = urls.iter().cloned().collect();
        Self { urls, index }
    }

    /// Returns whether `path` is a canonical path.
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains(path)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Iterates over the paths in store order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for CanonicalUrlSet {
    fn from(urls: Vec<String>) -> Self {
        Self::new(urls)
    }
}
