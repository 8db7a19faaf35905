//! One create-or-edit session: a draft, its tag editor and a pending cover

use super::{SaveCoordinator, TagEditor};
use crate::error::SaveError;
use crate::types::{BookDraft, BookRecord, CoverFile};

/// State owned by an open edit form.
///
/// Dropping the session discards the draft; the library store never sees it
/// unless [`EditSession::submit`] succeeds.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    /// Field values being edited. `draft.tags` is not an input: it is
    /// replaced by the editor's tags on every submit.
    pub draft: BookDraft,
    /// The only source of the tags that get saved
    pub tags: TagEditor,
    cover: Option<CoverFile>,
    last_error: Option<SaveError>,
}

impl EditSession {
    /// Session for a book that does not exist yet
    pub fn create() -> Self {
        Self::default()
    }

    /// Session seeded with a copy of `record`
    pub fn edit(record: &BookRecord) -> Self {
        let draft = BookDraft::from_record(record);
        let tags = TagEditor::with_tags(draft.tags.clone());
        Self {
            draft,
            tags,
            cover: None,
            last_error: None,
        }
    }

    /// Pick a new cover to upload with the next submit
    pub fn set_cover(&mut self, cover: CoverFile) {
        self.cover = Some(cover);
    }

    pub fn clear_cover(&mut self) {
        self.cover = None;
    }

    pub fn cover(&self) -> Option<&CoverFile> {
        self.cover.as_ref()
    }

    /// Error from the most recent submit, if it failed
    pub fn last_error(&self) -> Option<&SaveError> {
        self.last_error.as_ref()
    }

    /// Save the draft with the editor's tags.
    ///
    /// Any tags written straight into `draft.tags` are discarded. On failure the draft and cover stay as they were for a retry.
    pub async fn submit(&mut self, coordinator: &SaveCoordinator) -> Result<BookRecord, SaveError> {
        self.draft.tags = self.tags.tags().clone();

        match coordinator.save(&self.draft, self.cover.clone()).await {
            Ok(record) => {
                self.last_error = None;
                Ok(record)
            }
            Err(e) => {
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }
}
