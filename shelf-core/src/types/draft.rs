//! Unsaved book drafts and the payloads built from them

use super::{BookId, BookRecord, TagSet};
use chrono::{DateTime, Utc};
use std::path::Path;

/// A working copy of a book under edit.
///
/// Seeded by cloning a [`BookRecord`], so edits never touch the record held
/// by the library store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookDraft {
    /// `None` for a book that has not been created yet
    pub id: Option<BookId>,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub series: Option<String>,
    pub series_number: Option<String>,
    pub publication_date: Option<DateTime<Utc>>,
    pub tags: TagSet,
}

impl BookDraft {
    /// Empty draft for a new book
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft seeded from an existing record
    pub fn from_record(record: &BookRecord) -> Self {
        Self {
            id: Some(record.id.clone()),
            title: record.title.clone(),
            author: record.author.clone(),
            description: record.description.clone(),
            series: record.series.clone(),
            series_number: record.series_number.clone(),
            publication_date: record.publication_date,
            tags: record.tags.clone(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// The writable field set sent to the backend
    pub fn to_fields(&self) -> BookFields {
        BookFields {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            description: non_blank(&self.description),
            series: non_blank(&self.series),
            series_number: non_blank(&self.series_number),
            publication_date: self.publication_date,
            tags: self.tags.clone(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Fields accepted by `create_book` and `update_book`
#[derive(Debug, Clone, PartialEq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub series: Option<String>,
    pub series_number: Option<String>,
    pub publication_date: Option<DateTime<Utc>>,
    pub tags: TagSet,
}

impl BookFields {
    /// Text parts of the save request, in wire order.
    /// Absent optional values are sent empty so an update can clear them.
    pub fn form_parts(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("author", self.author.clone()),
            ("description", self.description.clone().unwrap_or_default()),
            ("series", self.series.clone().unwrap_or_default()),
            ("seriesNumber", self.series_number.clone().unwrap_or_default()),
            (
                "publicationDate",
                self.publication_date
                    .as_ref()
                    .map(super::dates::format_timestamp)
                    .unwrap_or_default(),
            ),
            ("tags", self.tags.to_wire()),
        ]
    }
}

/// A cover image picked by the user. The bytes are never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl CoverFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    /// Read a cover from disk
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("cover")
            .to_string();
        Ok(Self::new(file_name, bytes))
    }

    /// Lowercase file extension, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
