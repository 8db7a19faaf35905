//! Delete command implementation

use anyhow::{Context, Result};
use shelf_core::LibraryStore;

/// Remove a book from the catalog
pub async fn delete(store: &LibraryStore, id: &str) -> Result<()> {
    store
        .delete_book(id)
        .await
        .with_context(|| format!("Failed to delete book {}", id))?;

    println!("Deleted {}", id);
    Ok(())
}
