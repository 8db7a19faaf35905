//! Library store: the fetched collection, the query and the sync protocol
//!
//! A [`LibraryStore`] is a cheap-to-clone handle. Create one at start-up,
//! hand clones to whatever needs the library, and drop them at shutdown.
//! Only the store's own operations mutate its state.
//!
//! Every fetch takes a request token. A response is applied only if its token
//! is still the latest one when it arrives, so a slow response to an older
//! search can never overwrite fresher results.

use crate::backend::{CatalogBackend, HttpBackend};
use crate::config::ClientConfig;
use crate::error::{BackendError, Result};
use crate::sort::{sort_books, SortMode};
use crate::types::BookRecord;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Where the collection is in its fetch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Error,
}

/// Search text and display order chosen by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryQuery {
    pub search_text: String,
    pub sort_mode: SortMode,
}

/// Read-only copy of the store's state for the view layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySnapshot {
    /// In fetch-response order; apply [`sort_books`] for display
    pub books: Vec<BookRecord>,
    pub status: LoadStatus,
    pub error_message: Option<String>,
    pub query: LibraryQuery,
}

/// What happened to one fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the collection
    Applied(usize),
    /// The backend failed; the previous collection was kept
    Failed(BackendError),
    /// A newer fetch started before this one finished; the response was dropped
    Superseded,
}

/// Which search text a fetch runs with
enum FetchTarget {
    /// Replace the current search text and fetch it
    NewSearch(String),
    /// Fetch this text, leaving the search text alone
    Text(String),
    CurrentSearch,
}

#[derive(Debug, Default)]
struct StoreState {
    books: Vec<BookRecord>,
    status: LoadStatus,
    error_message: Option<String>,
    query: LibraryQuery,
    /// Token of the most recent fetch; only its response may be applied
    latest_request: u64,
    /// Search text of the most recent fetch, for `retry`
    last_fetch_text: Option<String>,
}

/// Shared handle to the library state
#[derive(Clone)]
pub struct LibraryStore {
    backend: Arc<dyn CatalogBackend>,
    state: Arc<RwLock<StoreState>>,
}

impl LibraryStore {
    /// Create an empty, idle store
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(StoreState::default())),
        }
    }

    /// Store backed by the REST catalog described by `config`
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let backend = HttpBackend::new(config)?;
        Ok(Self::new(Arc::new(backend)))
    }

    /// The backend this store syncs with
    pub fn backend(&self) -> Arc<dyn CatalogBackend> {
        self.backend.clone()
    }

    pub async fn snapshot(&self) -> LibrarySnapshot {
        let state = self.state.read().await;
        LibrarySnapshot {
            books: state.books.clone(),
            status: state.status,
            error_message: state.error_message.clone(),
            query: state.query.clone(),
        }
    }

    pub async fn query(&self) -> LibraryQuery {
        self.state.read().await.query.clone()
    }

    pub async fn status(&self) -> LoadStatus {
        self.state.read().await.status
    }

    /// The collection in the current sort mode's order
    pub async fn sorted_books(&self) -> Vec<BookRecord> {
        let state = self.state.read().await;
        sort_books(&state.books, state.query.sort_mode)
    }

    /// Look up a fetched record by id
    pub async fn find(&self, id: &str) -> Option<BookRecord> {
        self.state
            .read()
            .await
            .books
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }

    /// Update the search text and fetch matching books
    pub async fn set_search_query(&self, text: impl Into<String>) -> FetchOutcome {
        let (token, text) = self.begin_fetch(FetchTarget::NewSearch(text.into())).await;
        self.complete_fetch(token, text).await
    }

    /// Change the display order. Local only; nothing is fetched.
    pub async fn set_sort_mode(&self, mode: SortMode) {
        self.state.write().await.query.sort_mode = mode;
    }

    /// Fetch books for `query_text`, or for the current search text.
    ///
    /// On failure the previous collection stays in place and the status
    /// becomes [`LoadStatus::Error`].
    pub async fn fetch_books(&self, query_text: Option<&str>) -> FetchOutcome {
        let target = match query_text {
            Some(text) => FetchTarget::Text(text.to_string()),
            None => FetchTarget::CurrentSearch,
        };
        let (token, text) = self.begin_fetch(target).await;
        self.complete_fetch(token, text).await
    }

    /// Take a request token and mark the store as loading.
    ///
    /// A new search text is recorded under the same lock as its token, so
    /// the latest token always belongs to the current search text.
    async fn begin_fetch(&self, target: FetchTarget) -> (u64, String) {
        let mut state = self.state.write().await;
        let text = match target {
            FetchTarget::NewSearch(text) => {
                state.query.search_text = text.clone();
                text
            }
            FetchTarget::Text(text) => text,
            FetchTarget::CurrentSearch => state.query.search_text.clone(),
        };
        state.latest_request += 1;
        state.status = LoadStatus::Loading;
        state.error_message = None;
        state.last_fetch_text = Some(text.clone());
        (state.latest_request, text)
    }

    async fn complete_fetch(&self, token: u64, text: String) -> FetchOutcome {
        debug!(token, search = %text, "Fetching books");
        let result = self.backend.list_books(&text).await;

        let mut state = self.state.write().await;
        if token != state.latest_request {
            debug!(
                token,
                latest = state.latest_request,
                search = %text,
                "Discarding stale response"
            );
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(books) => {
                let count = books.len();
                state.books = books;
                state.status = LoadStatus::Idle;
                info!(count, search = %text, "Fetched books");
                FetchOutcome::Applied(count)
            }
            Err(e) => {
                warn!(search = %text, "Failed to fetch books: {}", e);
                state.status = LoadStatus::Error;
                state.error_message = Some(e.to_string());
                FetchOutcome::Failed(e)
            }
        }
    }

    /// Re-derive the collection from the backend after a mutation
    pub async fn invalidate(&self) -> FetchOutcome {
        self.fetch_books(None).await
    }

    /// Repeat the most recent fetch
    pub async fn retry(&self) -> FetchOutcome {
        let last = self.state.read().await.last_fetch_text.clone();
        self.fetch_books(last.as_deref()).await
    }

    /// Stop waiting for any in-flight fetch. Its response will be discarded
    /// when it arrives; the network call itself is not aborted.
    pub async fn abandon_pending(&self) {
        let mut state = self.state.write().await;
        state.latest_request += 1;
        if state.status == LoadStatus::Loading {
            state.status = LoadStatus::Idle;
        }
    }

    /// Delete a book and refresh the collection.
    ///
    /// A book that was already gone still triggers the refresh, since the
    /// collection is evidently out of date.
    pub async fn delete_book(&self, id: &str) -> Result<()> {
        match self.backend.delete_book(id).await {
            Ok(()) => {
                info!(id, "Deleted book");
                self.invalidate().await;
                Ok(())
            }
            Err(BackendError::NotFound(missing)) => {
                warn!(id, "Book was already deleted");
                self.invalidate().await;
                Err(BackendError::NotFound(missing).into())
            }
            Err(e) => {
                warn!(id, "Failed to delete book: {}", e);
                Err(e.into())
            }
        }
    }

    /// Fetch the book file. The bytes are passed through untouched.
    pub async fn download_book(&self, id: &str) -> Result<Vec<u8>> {
        Ok(self.backend.download_book(id).await?)
    }
}
