//! Field validation predicates

use crate::error::{Field, FieldError, ValidationErrors};
use crate::types::BookDraft;

/// Maximum tag length, counted in characters
pub const MAX_TAG_LENGTH: usize = 50;

/// Delimiter used when tags are joined for the wire
pub const TAG_DELIMITER: char = ',';

/// A required text field is present once it holds something besides whitespace
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check an already-trimmed tag against the length and delimiter rules
pub fn is_valid_tag(tag: &str) -> bool {
    let len = tag.chars().count();
    (1..=MAX_TAG_LENGTH).contains(&len) && !tag.contains(TAG_DELIMITER)
}

/// Validate the fields a save request requires.
///
/// Collects every failure instead of stopping at the first so the caller can
/// show all of them at once.
pub fn validate_draft(draft: &BookDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if !is_present(&draft.title) {
        errors.push(FieldError::required(Field::Title));
    }
    if !is_present(&draft.author) {
        errors.push(FieldError::required(Field::Author));
    }
    if let Some(bad) = draft.tags.iter().find(|t| !is_valid_tag(t)) {
        errors.push(FieldError {
            field: Field::Tags,
            problem: format!("contains an invalid tag: {:?}", bad),
        });
    }

    errors.into_result()
}
