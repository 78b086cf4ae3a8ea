//! Parsed key-value pairs.

use indexmap::IndexMap;
use std::fmt;
use std::ops::Index;

/// Ordered mapping from key to value, in the order keys first appeared.
///
/// A repeated key keeps its original slot and takes the later value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    pairs: IndexMap<String, String>,
}

impl Parsed {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.contains_key(key)
    }

    /// Iterate pairs in key order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.pairs.values().map(String::as_str)
    }

    pub(crate) fn insert(&mut self, key: String, value: String) {
        self.pairs.insert(key, value);
    }
}

impl fmt::Debug for Parsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.pairs.iter()).finish()
    }
}

impl Index<&str> for Parsed {
    type Output = str;

    fn index(&self, key: &str) -> &str {
        &self.pairs[key]
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parsed {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut parsed = Parsed::new();
        for (k, v) in iter {
            parsed.insert(k.into(), v.into());
        }
        parsed
    }
}

impl IntoIterator for Parsed {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}
