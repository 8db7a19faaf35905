//! List command implementation

use anyhow::{bail, Result};
use shelf_core::{
    sort_books_by_name, BookRecord, ClientConfig, FetchOutcome, LibraryStore, SortMode,
};

/// Fetch the books matching `search` and print them in `sort` order
pub async fn list(
    store: &LibraryStore,
    config: &ClientConfig,
    search: &str,
    sort: &str,
    json: bool,
) -> Result<()> {
    if let FetchOutcome::Failed(e) = store.set_search_query(search).await {
        bail!("Failed to fetch books: {}", e);
    }

    let books = match sort.parse::<SortMode>() {
        Ok(mode) => {
            store.set_sort_mode(mode).await;
            store.sorted_books().await
        }
        // Unknown modes keep the catalog's order
        Err(_) => sort_books_by_name(&store.snapshot().await.books, sort),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&books)?);
        return Ok(());
    }

    if books.is_empty() {
        println!("No books found");
        return Ok(());
    }

    for book in &books {
        print_book(book, config);
    }
    println!("{} book(s)", books.len());

    Ok(())
}

fn print_book(book: &BookRecord, config: &ClientConfig) {
    println!("{}  {} by {}", book.id, book.title, book.author);
    if let Some(series) = &book.series {
        match &book.series_number {
            Some(number) => println!("    Series:    {} #{}", series, number),
            None => println!("    Series:    {}", series),
        }
    }
    if !book.tags.is_empty() {
        println!("    Tags:      {}", book.tags.as_slice().join(", "));
    }
    if let Some(words) = book.word_count {
        println!("    Words:     {}", words);
    }
    if let Some(date) = book.publication_date {
        println!("    Published: {}", date.format("%Y-%m-%d"));
    }
    println!("    Added:     {}", book.added_date.format("%Y-%m-%d"));
    if let Some(url) = book.cover_path.as_deref().and_then(|p| config.cover_url(p)) {
        println!("    Cover:     {}", url);
    }
}
