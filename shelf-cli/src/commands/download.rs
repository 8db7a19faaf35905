//! Download command implementation

use anyhow::{Context, Result};
use shelf_core::LibraryStore;

/// Save a book file to `output`
pub async fn download(store: &LibraryStore, id: &str, output: &str) -> Result<()> {
    let bytes = store
        .download_book(id)
        .await
        .with_context(|| format!("Failed to download book {}", id))?;

    tokio::fs::write(output, &bytes)
        .await
        .with_context(|| format!("Failed to write output file: {}", output))?;

    println!("Wrote {} bytes to {}", bytes.len(), output);
    Ok(())
}
