//! CLI command implementations

mod add;
mod delete;
mod download;
mod edit;
mod list;

pub use add::add;
pub use delete::delete;
pub use download::download;
pub use edit::edit;
pub use list::list;

use anyhow::{Context, Result};
use clap::Args;
use shelf_core::types::dates::parse_timestamp;
use shelf_core::{CoverFile, EditSession};

/// Book fields shared by `add` and `edit`. Unset flags leave the field alone.
#[derive(Args, Debug, Default)]
pub struct BookArgs {
    /// Book title
    #[arg(long)]
    pub title: Option<String>,

    /// Book author
    #[arg(long)]
    pub author: Option<String>,

    /// Short description
    #[arg(long)]
    pub description: Option<String>,

    /// Series name
    #[arg(long)]
    pub series: Option<String>,

    /// Position in the series
    #[arg(long)]
    pub series_number: Option<String>,

    /// Publication date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub published: Option<String>,

    /// Cover image to upload
    #[arg(long)]
    pub cover: Option<String>,
}

impl BookArgs {
    /// Copy the given flags into the session's draft and load the cover
    pub async fn apply(self, session: &mut EditSession) -> Result<()> {
        let draft = &mut session.draft;
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(author) = self.author {
            draft.author = author;
        }
        if let Some(description) = self.description {
            draft.description = Some(description);
        }
        if let Some(series) = self.series {
            draft.series = Some(series);
        }
        if let Some(series_number) = self.series_number {
            draft.series_number = Some(series_number);
        }
        if let Some(published) = self.published {
            let date = parse_timestamp(&published)
                .with_context(|| format!("Invalid publication date: {}", published))?;
            draft.publication_date = Some(date);
        }
        if let Some(cover) = self.cover {
            let cover = CoverFile::from_path(&cover)
                .await
                .with_context(|| format!("Failed to read cover image: {}", cover))?;
            session.set_cover(cover);
        }
        Ok(())
    }
}

/// Run each tag through the editor, stopping at the first rejected one
pub fn add_tags(session: &mut EditSession, tags: &[String]) -> Result<()> {
    for tag in tags {
        session
            .tags
            .add_tag(tag)
            .with_context(|| format!("Cannot add tag {:?}", tag))?;
    }
    Ok(())
}
