//! Shelf Core Library
//!
//! Client-side engine for browsing and editing a personal book catalog kept by
//! a remote service. The [`LibraryStore`] owns the fetched collection and the
//! query; [`sort_books`] orders it for display without touching it; the
//! [`editor`] module holds the draft, tag and save-transaction logic.

pub mod backend;
pub mod config;
pub mod editor;
pub mod error;
pub mod sort;
pub mod store;
pub mod types;
pub mod validation;

pub use backend::{CatalogBackend, HttpBackend, MemoryBackend, SearchGate};
pub use config::ClientConfig;
pub use editor::{EditSession, SaveCoordinator, TagEditor};
pub use error::{
    BackendError, ConfigError, Field, FieldError, Result, SaveError, ShelfError, TagError,
    ValidationErrors,
};
pub use sort::{sort_books, sort_books_by_name, SortMode};
pub use store::{FetchOutcome, LibraryQuery, LibrarySnapshot, LibraryStore, LoadStatus};
pub use types::{BookDraft, BookFields, BookId, BookRecord, CoverFile, TagSet};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_book_creation() {
        let book = BookRecord::new("1", "Test Book", "Someone", Utc::now());
        assert_eq!(book.title, "Test Book");
        assert!(book.tags.is_empty());
    }
}
