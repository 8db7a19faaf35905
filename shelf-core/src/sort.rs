//! Display ordering for the book collection.
//!
//! Sorting is applied on read and never changes the stored collection.
//! Every mode uses a stable sort, so records that compare equal keep their
//! fetch order.

use crate::types::BookRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Named ordering criteria offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Newest `added_date` first
    #[default]
    RecentlyAdded,
    TitleAsc,
    TitleDesc,
    /// Shortest first; a missing word count reads as zero
    ReadTimeAsc,
    ReadTimeDesc,
    /// Newest publication first; a missing date sorts last
    DatePublishedDesc,
    DatePublishedAsc,
}

impl SortMode {
    pub const ALL: [SortMode; 7] = [
        SortMode::RecentlyAdded,
        SortMode::TitleAsc,
        SortMode::TitleDesc,
        SortMode::ReadTimeAsc,
        SortMode::ReadTimeDesc,
        SortMode::DatePublishedDesc,
        SortMode::DatePublishedAsc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::RecentlyAdded => "recently-added",
            SortMode::TitleAsc => "title-asc",
            SortMode::TitleDesc => "title-desc",
            SortMode::ReadTimeAsc => "read-time-asc",
            SortMode::ReadTimeDesc => "read-time-desc",
            SortMode::DatePublishedDesc => "date-published-desc",
            SortMode::DatePublishedAsc => "date-published-asc",
        }
    }

    fn compare(&self, a: &BookRecord, b: &BookRecord) -> Ordering {
        match self {
            SortMode::RecentlyAdded => b.added_date.cmp(&a.added_date),
            SortMode::TitleAsc => compare_titles(&a.title, &b.title),
            SortMode::TitleDesc => compare_titles(&b.title, &a.title),
            SortMode::ReadTimeAsc => a.word_count_or_zero().cmp(&b.word_count_or_zero()),
            SortMode::ReadTimeDesc => b.word_count_or_zero().cmp(&a.word_count_or_zero()),
            SortMode::DatePublishedDesc => b
                .publication_date_or_min()
                .cmp(&a.publication_date_or_min()),
            SortMode::DatePublishedAsc => a
                .publication_date_or_min()
                .cmp(&b.publication_date_or_min()),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a sort-mode name that is not one of [`SortMode::ALL`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort mode: {0}")]
pub struct UnknownSortMode(pub String);

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownSortMode(s.to_string()))
    }
}

/// Case-insensitive title order, falling back to the raw text so that
/// only identical titles compare equal
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Return the books in display order for `mode`. The input is not modified.
pub fn sort_books(books: &[BookRecord], mode: SortMode) -> Vec<BookRecord> {
    let mut sorted = books.to_vec();
    // `sort_by` is stable
    sorted.sort_by(|a, b| mode.compare(a, b));
    sorted
}

/// Sort by a mode name; an unknown name leaves the input order unchanged
pub fn sort_books_by_name(books: &[BookRecord], mode: &str) -> Vec<BookRecord> {
    match mode.parse::<SortMode>() {
        Ok(mode) => sort_books(books, mode),
        Err(e) => {
            tracing::warn!("{}, keeping fetch order", e);
            books.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn book(id: &str, title: &str, words: Option<u64>, day: u32) -> BookRecord {
        let mut book = BookRecord::new(
            id,
            title,
            "Author",
            Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        );
        book.word_count = words;
        book
    }

    fn ids(books: &[BookRecord]) -> Vec<&str> {
        books.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_mode_names_round_trip() {
        for mode in SortMode::ALL {
            assert_eq!(mode.as_str().parse::<SortMode>().unwrap(), mode);
        }
        assert!("newest".parse::<SortMode>().is_err());
    }

    #[test]
    fn test_recently_added() {
        let books = vec![book("a", "A", None, 1), book("b", "B", None, 3), book("c", "C", None, 2)];
        assert_eq!(ids(&sort_books(&books, SortMode::RecentlyAdded)), ["b", "c", "a"]);
    }

    #[test]
    fn test_title_is_case_insensitive() {
        let books = vec![
            book("1", "hyperion", None, 1),
            book("2", "Dune", None, 1),
            book("3", "anathem", None, 1),
        ];
        assert_eq!(ids(&sort_books(&books, SortMode::TitleAsc)), ["3", "2", "1"]);
        assert_eq!(ids(&sort_books(&books, SortMode::TitleDesc)), ["1", "2", "3"]);
    }

    #[test]
    fn test_read_time_treats_missing_as_zero() {
        let books = vec![
            book("long", "L", Some(200_000), 1),
            book("none", "N", None, 1),
            book("short", "S", Some(40_000), 1),
        ];
        assert_eq!(
            ids(&sort_books(&books, SortMode::ReadTimeAsc)),
            ["none", "short", "long"]
        );
        assert_eq!(
            ids(&sort_books(&books, SortMode::ReadTimeDesc)),
            ["long", "short", "none"]
        );
    }

    #[test]
    fn test_missing_publication_date_sorts_as_earliest() {
        let published = Utc.with_ymd_and_hms(1965, 8, 1, 0, 0, 0).unwrap();
        let books = vec![
            book("undated", "U", None, 1),
            book("dated", "D", None, 1).with_publication_date(published),
        ];
        assert_eq!(
            ids(&sort_books(&books, SortMode::DatePublishedDesc)),
            ["dated", "undated"]
        );
        assert_eq!(
            ids(&sort_books(&books, SortMode::DatePublishedAsc)),
            ["undated", "dated"]
        );
    }

    #[test]
    fn test_ties_keep_input_order_in_both_directions() {
        let books = vec![
            book("first", "Same", Some(10), 1),
            book("second", "Same", Some(10), 1),
        ];
        for mode in SortMode::ALL {
            assert_eq!(ids(&sort_books(&books, mode)), ["first", "second"], "{}", mode);
        }
    }

    #[test]
    fn test_unknown_name_keeps_order() {
        let books = vec![book("b", "B", None, 1), book("a", "A", None, 2)];
        assert_eq!(ids(&sort_books_by_name(&books, "by-colour")), ["b", "a"]);
        assert_eq!(ids(&sort_books_by_name(&books, "title-asc")), ["a", "b"]);
    }

    #[test]
    fn test_input_is_untouched() {
        let books = vec![book("b", "B", None, 1), book("a", "A", None, 2)];
        let _ = sort_books(&books, SortMode::TitleAsc);
        assert_eq!(ids(&books), ["b", "a"]);
    }
}
