//! Catalog backend abstraction
//!
//! The library store and the save coordinator only talk to the remote catalog
//! through [`CatalogBackend`]. [`HttpBackend`] speaks the REST API;
//! [`MemoryBackend`] keeps everything in process for tests and demos.

mod http;
mod memory;

pub use http::HttpBackend;
pub use memory::{MemoryBackend, SearchGate};

use crate::error::BackendError;
use crate::types::{BookFields, BookRecord, CoverFile};
use async_trait::async_trait;

/// Result type for backend operations
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Operations the client core requires from the catalog service
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Books matching `search_text`, unsorted. An empty string matches everything.
    async fn list_books(&self, search_text: &str) -> BackendResult<Vec<BookRecord>>;

    /// Create a book, returning the record as stored
    async fn create_book(
        &self,
        fields: BookFields,
        cover: Option<CoverFile>,
    ) -> BackendResult<BookRecord>;

    /// Replace the writable fields of an existing book
    async fn update_book(
        &self,
        id: &str,
        fields: BookFields,
        cover: Option<CoverFile>,
    ) -> BackendResult<BookRecord>;

    /// Delete a book; unknown ids fail with [`BackendError::NotFound`]
    async fn delete_book(&self, id: &str) -> BackendResult<()>;

    /// Raw bytes of the book file
    async fn download_book(&self, id: &str) -> BackendResult<Vec<u8>>;
}
