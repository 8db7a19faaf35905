//! Add command implementation

use super::{add_tags, BookArgs};
use anyhow::{Context, Result};
use shelf_core::{EditSession, LibraryStore, SaveCoordinator};

/// Create a book from command-line fields
pub async fn add(store: LibraryStore, book: BookArgs, tags: &[String]) -> Result<()> {
    let mut session = EditSession::create();
    book.apply(&mut session).await?;
    add_tags(&mut session, tags)?;

    let coordinator = SaveCoordinator::new(store);
    let record = session
        .submit(&coordinator)
        .await
        .context("Failed to add book")?;

    println!("Added {} ({})", record.title, record.id);
    Ok(())
}
