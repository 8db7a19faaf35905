//! Catalog data model shared by the store, the editor and the backends

mod book;
pub mod dates;
mod draft;
mod tags;

pub use book::{BookId, BookRecord};
pub use draft::{BookDraft, BookFields, CoverFile};
pub use tags::TagSet;
