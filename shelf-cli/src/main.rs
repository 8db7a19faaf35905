//! Shelf CLI - terminal front end for a remote book catalog

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::BookArgs;
use shelf_core::{ClientConfig, LibraryStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Catalog API base URL (overrides SHELF_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Base URL for cover images (overrides SHELF_ASSET_URL)
    #[arg(long, global = true)]
    asset_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List books in the catalog
    List {
        /// Only show books matching this text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Display order (recently-added, title-asc, title-desc, read-time-asc,
        /// read-time-desc, date-published-desc, date-published-asc)
        #[arg(long, default_value = "recently-added")]
        sort: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a new book
    Add {
        #[command(flatten)]
        book: BookArgs,

        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Edit an existing book
    Edit {
        /// Book id
        id: String,

        #[command(flatten)]
        book: BookArgs,

        /// Tag to attach (repeatable)
        #[arg(long = "add-tag")]
        add_tags: Vec<String>,

        /// Tag to remove (repeatable)
        #[arg(long = "remove-tag")]
        remove_tags: Vec<String>,
    },

    /// Delete a book
    Delete {
        /// Book id
        id: String,
    },

    /// Download a book file
    Download {
        /// Book id
        id: String,

        /// Output file path
        #[arg(short, long)]
        output: String,
    },
}

fn client_config(api_url: Option<&str>, asset_url: Option<&str>) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("Invalid client configuration")?;
    if let Some(api_url) = api_url {
        let timeout = config.timeout;
        config = ClientConfig::new(api_url)
            .context("Invalid --api-url")?
            .with_timeout(timeout);
    }
    if let Some(asset_url) = asset_url {
        config = config
            .with_asset_url(asset_url)
            .context("Invalid --asset-url")?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "shelf_cli=debug,shelf_core=debug"
    } else {
        "shelf_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = client_config(cli.api_url.as_deref(), cli.asset_url.as_deref())?;
    tracing::debug!("Using catalog at {}", config.api_url);

    let store = LibraryStore::connect(config.clone()).context("Failed to create HTTP client")?;

    match cli.command {
        Commands::List { search, sort, json } => {
            commands::list(&store, &config, &search, &sort, json).await
        }

        Commands::Add { book, tags } => commands::add(store, book, &tags).await,

        Commands::Edit {
            id,
            book,
            add_tags,
            remove_tags,
        } => commands::edit(store, &id, book, &add_tags, &remove_tags).await,

        Commands::Delete { id } => commands::delete(&store, &id).await,

        Commands::Download { id, output } => commands::download(&store, &id, &output).await,
    }
}
