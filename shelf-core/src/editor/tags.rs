//! Tag editing state for a single draft

use crate::error::TagError;
use crate::types::TagSet;
use crate::validation::is_valid_tag;

/// In-memory state behind the tag input of the edit form.
///
/// Failures are recorded in [`TagEditor::error`] instead of escaping to the
/// caller; the error only describes the most recent failed attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagEditor {
    tags: TagSet,
    pending_input: String,
    error: Option<TagError>,
}

impl TagEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing tag set
    pub fn with_tags(tags: TagSet) -> Self {
        Self {
            tags,
            ..Self::default()
        }
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn error(&self) -> Option<&TagError> {
        self.error.as_ref()
    }

    /// Replace the text in the input box. Clears any previous error.
    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
        self.error = None;
    }

    /// Add whatever is in the input box
    pub fn commit_pending(&mut self) -> Result<(), TagError> {
        let candidate = self.pending_input.clone();
        self.add_tag(&candidate)
    }

    /// Trim and add `candidate`.
    ///
    /// The returned error is also kept in [`TagEditor::error`] for display.
    pub fn add_tag(&mut self, candidate: &str) -> Result<(), TagError> {
        let tag = candidate.trim();

        let outcome = if !is_valid_tag(tag) {
            Err(TagError::InvalidTag)
        } else if !self.tags.insert(tag.to_string()) {
            Err(TagError::DuplicateTag(tag.to_string()))
        } else {
            self.pending_input.clear();
            Ok(())
        };

        self.error = outcome.clone().err();
        outcome
    }

    /// Remove the first exact match; absent values are ignored
    pub fn remove_tag(&mut self, value: &str) {
        self.tags.remove(value);
    }

    pub fn into_tags(self) -> TagSet {
        self.tags
    }
}
