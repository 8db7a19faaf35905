//! Edit command implementation

use super::{add_tags, BookArgs};
use anyhow::{bail, Context, Result};
use shelf_core::{EditSession, FetchOutcome, LibraryStore, SaveCoordinator};

/// Apply command-line changes to an existing book
pub async fn edit(
    store: LibraryStore,
    id: &str,
    book: BookArgs,
    add: &[String],
    remove: &[String],
) -> Result<()> {
    if let FetchOutcome::Failed(e) = store.fetch_books(None).await {
        bail!("Failed to fetch books: {}", e);
    }
    let record = store
        .find(id)
        .await
        .with_context(|| format!("No book with id {}", id))?;

    let mut session = EditSession::edit(&record);
    book.apply(&mut session).await?;
    for tag in remove {
        session.tags.remove_tag(tag);
    }
    add_tags(&mut session, add)?;

    let coordinator = SaveCoordinator::new(store);
    let saved = session
        .submit(&coordinator)
        .await
        .with_context(|| format!("Failed to save book {}", id))?;

    println!("Saved {} ({})", saved.title, saved.id);
    Ok(())
}
