//! The catalog record as echoed by the backend

use super::TagSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned book identifier
pub type BookId = String;

/// One persisted catalog entry.
///
/// `id` and `added_date` are assigned by the backend and never change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    /// Unique identifier for this book
    pub id: BookId,

    pub title: String,

    pub author: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,

    /// Position in the series, kept as text ("2", "2.5", "II")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_number: Option<String>,

    #[serde(default)]
    pub tags: TagSet,

    /// Relative path of the stored cover image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,

    #[serde(with = "crate::types::dates")]
    pub added_date: DateTime<Utc>,

    #[serde(
        default,
        with = "crate::types::dates::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub publication_date: Option<DateTime<Utc>>,
}

impl BookRecord {
    /// Create a record with the required fields
    pub fn new(
        id: impl Into<BookId>,
        title: impl Into<String>,
        author: impl Into<String>,
        added_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            description: None,
            series: None,
            series_number: None,
            tags: TagSet::new(),
            cover_path: None,
            word_count: None,
            file_size: None,
            added_date,
            publication_date: None,
        }
    }

    /// Set word count
    pub fn with_word_count(mut self, word_count: u64) -> Self {
        self.word_count = Some(word_count);
        self
    }

    /// Set publication date
    pub fn with_publication_date(mut self, date: DateTime<Utc>) -> Self {
        self.publication_date = Some(date);
        self
    }

    /// Set tags
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    /// Word count with the missing value read as zero
    pub fn word_count_or_zero(&self) -> u64 {
        self.word_count.unwrap_or(0)
    }

    /// Publication date with the missing value read as the earliest instant
    pub fn publication_date_or_min(&self) -> DateTime<Utc> {
        self.publication_date.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_wire_record() {
        let json = r#"{
            "id": "b1",
            "title": "Dune",
            "author": "Herbert",
            "tags": "Sci-Fi, Classic",
            "wordCount": 190000,
            "addedDate": "2024-01-01",
            "publicationDate": "1965-08-01T00:00:00Z"
        }"#;

        let book: BookRecord = serde_json::from_str(json).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.tags.as_slice(), ["Sci-Fi", "Classic"]);
        assert_eq!(book.word_count, Some(190000));
        assert_eq!(
            book.added_date,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert!(book.cover_path.is_none());
        assert!(book.file_size.is_none());
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let book = BookRecord::new(
            "b1",
            "Dune",
            "Herbert",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .with_word_count(10);

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["wordCount"], 10);
        assert_eq!(value["addedDate"], "2024-01-01T00:00:00Z");
        assert_eq!(value["tags"], "");
        assert!(value.get("publicationDate").is_none());
    }

    #[test]
    fn test_missing_values_read_as_defaults() {
        let book = BookRecord::new("b1", "Dune", "Herbert", Utc::now());
        assert_eq!(book.word_count_or_zero(), 0);
        assert_eq!(book.publication_date_or_min(), DateTime::<Utc>::MIN_UTC);
    }
}
