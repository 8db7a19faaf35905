//! In-memory catalog backend (for testing)

use super::{BackendResult, CatalogBackend};
use crate::error::BackendError;
use crate::types::{BookFields, BookRecord, CoverFile};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Notify, RwLock};

#[derive(Debug, Clone)]
struct StoredBook {
    record: BookRecord,
    file: Option<Vec<u8>>,
}

/// Catalog kept in process memory.
///
/// Besides the catalog itself it can inject failures, hold a search until
/// released and count calls, which is what the store and save tests need.
#[derive(Default)]
pub struct MemoryBackend {
    books: RwLock<Vec<StoredBook>>,
    next_id: AtomicU64,
    calls: AtomicUsize,
    failure: RwLock<Option<BackendError>>,
    gates: RwLock<HashMap<String, Arc<Notify>>>,
}

/// Releases one held search, see [`MemoryBackend::hold_search`]
#[derive(Debug, Clone)]
pub struct SearchGate {
    notify: Arc<Notify>,
}

impl SearchGate {
    /// Let the held search respond
    pub fn release(&self) {
        // `notify_one` keeps a permit if the search has not started waiting yet
        self.notify.notify_one();
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-filled with records, kept in the given order
    pub fn with_books(books: impl IntoIterator<Item = BookRecord>) -> Self {
        let books = books
            .into_iter()
            .map(|record| StoredBook { record, file: None })
            .collect();
        Self {
            books: RwLock::new(books),
            ..Self::default()
        }
    }

    /// Attach a book file; sets the record's `file_size`
    pub async fn attach_file(&self, id: &str, bytes: Vec<u8>) -> BackendResult<()> {
        let mut books = self.books.write().await;
        let stored = books
            .iter_mut()
            .find(|b| b.record.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        stored.record.file_size = Some(bytes.len() as u64);
        stored.file = Some(bytes);
        Ok(())
    }

    /// Make every following call fail with `error` until [`recover`](Self::recover)
    pub async fn fail_with(&self, error: BackendError) {
        *self.failure.write().await = Some(error);
    }

    pub async fn recover(&self) {
        *self.failure.write().await = None;
    }

    /// The next search for exactly `search_text` waits until the gate is released
    pub async fn hold_search(&self, search_text: &str) -> SearchGate {
        let notify = Arc::new(Notify::new());
        self.gates
            .write()
            .await
            .insert(search_text.to_string(), notify.clone());
        SearchGate { notify }
    }

    /// Number of backend operations invoked so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Current records, in storage order
    pub async fn records(&self) -> Vec<BookRecord> {
        self.books
            .read()
            .await
            .iter()
            .map(|b| b.record.clone())
            .collect()
    }

    async fn begin_call(&self) -> BackendResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure.read().await.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn apply_fields(record: &mut BookRecord, fields: BookFields) {
        record.title = fields.title;
        record.author = fields.author;
        record.description = fields.description;
        record.series = fields.series;
        record.series_number = fields.series_number;
        record.publication_date = fields.publication_date;
        record.tags = fields.tags;
    }

    fn cover_path(id: &str, cover: &CoverFile) -> String {
        let ext = cover.extension().unwrap_or_else(|| "img".to_string());
        format!("covers/{}.{}", id, ext)
    }
}

fn matches_search(record: &BookRecord, search_lower: &str) -> bool {
    if search_lower.is_empty() {
        return true;
    }
    record.title.to_lowercase().contains(search_lower)
        || record.author.to_lowercase().contains(search_lower)
        || record
            .series
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains(search_lower))
        || record
            .tags
            .iter()
            .any(|t| t.to_lowercase().contains(search_lower))
}

#[async_trait]
impl CatalogBackend for MemoryBackend {
    async fn list_books(&self, search_text: &str) -> BackendResult<Vec<BookRecord>> {
        let gate = self.gates.write().await.remove(search_text);
        if let Some(notify) = gate {
            notify.notified().await;
        }
        self.begin_call().await?;

        let search_lower = search_text.trim().to_lowercase();
        Ok(self
            .books
            .read()
            .await
            .iter()
            .filter(|b| matches_search(&b.record, &search_lower))
            .map(|b| b.record.clone())
            .collect())
    }

    async fn create_book(
        &self,
        fields: BookFields,
        cover: Option<CoverFile>,
    ) -> BackendResult<BookRecord> {
        self.begin_call().await?;

        let id = format!("book-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut record = BookRecord::new(id.clone(), "", "", Utc::now());
        Self::apply_fields(&mut record, fields);
        if let Some(cover) = &cover {
            record.cover_path = Some(Self::cover_path(&id, cover));
        }

        self.books.write().await.push(StoredBook {
            record: record.clone(),
            file: None,
        });
        Ok(record)
    }

    async fn update_book(
        &self,
        id: &str,
        fields: BookFields,
        cover: Option<CoverFile>,
    ) -> BackendResult<BookRecord> {
        self.begin_call().await?;

        let mut books = self.books.write().await;
        let stored = books
            .iter_mut()
            .find(|b| b.record.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;

        Self::apply_fields(&mut stored.record, fields);
        if let Some(cover) = &cover {
            stored.record.cover_path = Some(Self::cover_path(id, cover));
        }
        Ok(stored.record.clone())
    }

    async fn delete_book(&self, id: &str) -> BackendResult<()> {
        self.begin_call().await?;

        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|b| b.record.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        books.remove(index);
        Ok(())
    }

    async fn download_book(&self, id: &str) -> BackendResult<Vec<u8>> {
        self.begin_call().await?;

        self.books
            .read()
            .await
            .iter()
            .find(|b| b.record.id == id)
            .and_then(|b| b.file.clone())
            .ok_or_else(|| BackendError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BookDraft;

    fn fields(title: &str, author: &str) -> BookFields {
        BookDraft {
            title: title.to_string(),
            author: author.to_string(),
            ..BookDraft::new()
        }
        .to_fields()
    }

    #[tokio::test]
    async fn test_memory_backend() {
        let backend = MemoryBackend::new();

        // Create
        let dune = backend
            .create_book(
                fields("Dune", "Herbert"),
                Some(CoverFile::new("dune.jpg", vec![1, 2, 3])),
            )
            .await
            .unwrap();
        assert_eq!(dune.id, "book-1");
        assert_eq!(dune.cover_path.as_deref(), Some("covers/book-1.jpg"));

        backend
            .create_book(fields("Hyperion", "Simmons"), None)
            .await
            .unwrap();

        // Search
        let found = backend.list_books("herb").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Dune");
        assert_eq!(backend.list_books("").await.unwrap().len(), 2);

        // Update keeps id and added date
        let updated = backend
            .update_book(&dune.id, fields("Dune Messiah", "Herbert"), None)
            .await
            .unwrap();
        assert_eq!(updated.id, dune.id);
        assert_eq!(updated.added_date, dune.added_date);
        assert_eq!(updated.cover_path, dune.cover_path);

        // Download
        backend.attach_file(&dune.id, b"epub".to_vec()).await.unwrap();
        assert_eq!(backend.download_book(&dune.id).await.unwrap(), b"epub");
        assert_eq!(backend.records().await[0].file_size, Some(4));

        // Delete
        backend.delete_book(&dune.id).await.unwrap();
        assert_eq!(
            backend.delete_book(&dune.id).await,
            Err(BackendError::NotFound(dune.id.clone()))
        );
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let backend = MemoryBackend::new();
        backend
            .fail_with(BackendError::Network("connection refused".to_string()))
            .await;

        let err = backend.list_books("").await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");

        backend.recover().await;
        assert!(backend.list_books("").await.is_ok());
        assert_eq!(backend.call_count(), 2);
    }
}
