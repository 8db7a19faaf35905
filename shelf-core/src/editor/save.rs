//! Save transaction: validate a draft, submit it with an optional cover,
//! then refresh the library

use crate::error::SaveError;
use crate::store::LibraryStore;
use crate::types::{BookDraft, BookRecord, CoverFile};
use crate::validation::validate_draft;
use tracing::{info, warn};

/// Turns a draft plus an optional new cover into one backend save request
#[derive(Clone)]
pub struct SaveCoordinator {
    store: LibraryStore,
}

impl SaveCoordinator {
    pub fn new(store: LibraryStore) -> Self {
        Self { store }
    }

    /// Validate and submit `draft`.
    ///
    /// Nothing is sent when validation fails. On success the backend's record
    /// is returned, since ids and computed fields only exist after the round
    /// trip, and the library store is refreshed. The draft is never consumed,
    /// so a failed save can be corrected and retried.
    pub async fn save(
        &self,
        draft: &BookDraft,
        cover: Option<CoverFile>,
    ) -> Result<BookRecord, SaveError> {
        validate_draft(draft).map_err(SaveError::Validation)?;

        let fields = draft.to_fields();
        let backend = self.store.backend();
        let result = match &draft.id {
            Some(id) => backend.update_book(id, fields, cover).await,
            None => backend.create_book(fields, cover).await,
        };

        match result {
            Ok(record) => {
                info!(id = %record.id, title = %record.title, "Saved book");
                self.store.invalidate().await;
                Ok(record)
            }
            Err(e) => {
                warn!("Failed to save book: {}", e);
                Err(SaveError::SaveFailed(e.to_string()))
            }
        }
    }
}
