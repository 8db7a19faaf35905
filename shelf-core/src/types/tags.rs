//! Tag set with its comma-joined wire form

use crate::validation::{is_valid_tag, TAG_DELIMITER};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered set of unique tags.
///
/// Insertion order is kept for display; uniqueness is the invariant.
/// Every element is trimmed and passes [`is_valid_tag`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the wire form.
    ///
    /// Elements are trimmed; empty, over-length and repeated elements are dropped.
    pub fn parse(raw: &str) -> Self {
        let mut set = Self::new();
        for candidate in raw.split(TAG_DELIMITER) {
            let tag = candidate.trim();
            if is_valid_tag(tag) && !set.contains(tag) {
                set.tags.push(tag.to_string());
            }
        }
        set
    }

    /// Join into the wire form
    pub fn to_wire(&self) -> String {
        self.tags.join(&TAG_DELIMITER.to_string())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Append a tag that the caller has already trimmed and validated.
    /// Returns `false` if it was already present.
    pub(crate) fn insert(&mut self, tag: String) -> bool {
        if self.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Remove the first exact match. Returns whether anything was removed.
    pub fn remove(&mut self, tag: &str) -> bool {
        match self.tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for TagSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|r| TagSet::parse(&r)).unwrap_or_default())
    }
}

impl<'a> FromIterator<&'a str> for TagSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for candidate in iter {
            let tag = candidate.trim();
            if is_valid_tag(tag) {
                set.insert(tag.to_string());
            }
        }
        set
    }
}
