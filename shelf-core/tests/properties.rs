//! Property tests for the sort engine and the tag wire format

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use shelf_core::{sort_books, BookRecord, SortMode, TagEditor, TagSet};

fn arb_mode() -> impl Strategy<Value = SortMode> {
    prop::sample::select(SortMode::ALL.to_vec())
}

/// Small value ranges so that ties are common
fn arb_books() -> impl Strategy<Value = Vec<BookRecord>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["Dune", "dune", "Emma", "Ulysses", "Beloved"]),
            prop::option::of(0u64..4),
            1u32..4,
            prop::option::of(1u32..4),
        ),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (title, words, added_day, published_day))| {
                let mut book = BookRecord::new(index.to_string(), title, "Author", day(added_day));
                book.word_count = words;
                book.publication_date = published_day.map(day);
                book
            })
            .collect()
    })
}

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
}

/// Whether two records share the sort key of `mode`
fn same_key(mode: SortMode, a: &BookRecord, b: &BookRecord) -> bool {
    match mode {
        SortMode::RecentlyAdded => a.added_date == b.added_date,
        SortMode::TitleAsc | SortMode::TitleDesc => a.title == b.title,
        SortMode::ReadTimeAsc | SortMode::ReadTimeDesc => {
            a.word_count_or_zero() == b.word_count_or_zero()
        }
        SortMode::DatePublishedAsc | SortMode::DatePublishedDesc => {
            a.publication_date_or_min() == b.publication_date_or_min()
        }
    }
}

fn original_index(book: &BookRecord) -> usize {
    book.id.parse().unwrap()
}

proptest! {
    #[test]
    fn sort_is_a_permutation(books in arb_books(), mode in arb_mode()) {
        let sorted = sort_books(&books, mode);

        let mut before: Vec<_> = books.iter().map(original_index).collect();
        let mut after: Vec<_> = sorted.iter().map(original_index).collect();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn sort_is_stable(books in arb_books(), mode in arb_mode()) {
        let sorted = sort_books(&books, mode);

        for (i, a) in sorted.iter().enumerate() {
            for b in &sorted[i + 1..] {
                if same_key(mode, a, b) {
                    prop_assert!(original_index(a) < original_index(b));
                }
            }
        }
    }

    #[test]
    fn sort_leaves_input_untouched(books in arb_books(), mode in arb_mode()) {
        let copy = books.clone();
        let _ = sort_books(&books, mode);
        prop_assert_eq!(books, copy);
    }

    #[test]
    fn editor_tags_round_trip(candidates in prop::collection::vec("[ a-zA-Z0-9,-]{0,60}", 0..12)) {
        let mut editor = TagEditor::new();
        for candidate in &candidates {
            let _ = editor.add_tag(candidate);
        }
        let tags = editor.tags().clone();

        prop_assert_eq!(TagSet::parse(&tags.to_wire()), tags);
    }

    #[test]
    fn parse_is_canonical(raw in "[ a-c,]{0,40}") {
        let once = TagSet::parse(&raw);
        let twice = TagSet::parse(&once.to_wire());
        prop_assert_eq!(once, twice);
    }
}
