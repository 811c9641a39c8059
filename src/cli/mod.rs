//! Command-line interface for libris.
//!
//! Provides commands for adding, listing, searching, sorting, editing and
//! removing catalog items, plus catalog statistics.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config;
use crate::domain::{Item, ItemKind};
use crate::library::{ItemChanges, Library};
use crate::store::{CatalogStore, JsonFileStore};

/// libris - Library catalog of books, magazines and newspapers
#[derive(Parser, Debug)]
#[command(name = "libris")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog file (overrides LIBRIS_HOME and .libris/config.yaml)
    #[arg(long, global = true, env = "LIBRIS_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add an item to the catalog
    Add {
        #[command(subcommand)]
        item: AddCommand,
    },

    /// List all items
    List {
        /// Show a sorted view instead of insertion order
        #[arg(short, long, value_enum)]
        sort: Option<SortKey>,

        /// Only show items of this kind
        #[arg(short, long)]
        kind: Option<ItemKind>,
    },

    /// Search the catalog
    Search {
        /// Search query (case-insensitive substring)
        query: String,

        /// Field to search
        #[arg(long, value_enum, default_value = "title")]
        by: SearchField,
    },

    /// Show the item with this exact title
    Show {
        /// Item title (case-insensitive)
        title: String,
    },

    /// Change fields of an existing item
    Edit {
        /// Title of the item to edit (case-insensitive)
        title: String,

        #[command(flatten)]
        changes: EditArgs,
    },

    /// Remove the item with this title
    Remove {
        /// Item title (case-insensitive)
        title: String,
    },

    /// Show item counts by kind
    Stats,

    /// Show resolved configuration (debug)
    Config,
}

/// Item kinds that can be added
#[derive(Subcommand, Debug)]
pub enum AddCommand {
    /// Add a book
    Book {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        publisher: String,
        #[arg(long)]
        year: i32,
    },

    /// Add a magazine issue
    Magazine {
        #[arg(long)]
        title: String,
        #[arg(long = "issue", allow_negative_numbers = true)]
        issue_number: i32,
        #[arg(long)]
        publisher: String,
        #[arg(long)]
        year: i32,
    },

    /// Add a newspaper
    Newspaper {
        #[arg(long)]
        title: String,
        #[arg(long)]
        editor: String,
        #[arg(long)]
        publisher: String,
        #[arg(long)]
        year: i32,
    },
}

impl AddCommand {
    /// Build the item, trimming text fields first
    fn into_item(self) -> Result<Item> {
        let item = match self {
            AddCommand::Book {
                title,
                author,
                publisher,
                year,
            } => Item::book(title.trim(), author.trim(), publisher.trim(), year),
            AddCommand::Magazine {
                title,
                issue_number,
                publisher,
                year,
            } => Item::magazine(title.trim(), issue_number, publisher.trim(), year),
            AddCommand::Newspaper {
                title,
                editor,
                publisher,
                year,
            } => Item::newspaper(title.trim(), editor.trim(), publisher.trim(), year),
        };
        item.context("Cannot add item")
    }
}

/// Field changes for `edit`
#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// New title
    #[arg(long = "title")]
    pub new_title: Option<String>,

    /// New publisher
    #[arg(long)]
    pub publisher: Option<String>,

    /// New publication year
    #[arg(long)]
    pub year: Option<i32>,

    /// New author (books only)
    #[arg(long)]
    pub author: Option<String>,

    /// New issue number (magazines only)
    #[arg(long = "issue", allow_negative_numbers = true)]
    pub issue_number: Option<i32>,

    /// New editor (newspapers only)
    #[arg(long)]
    pub editor: Option<String>,
}

impl From<EditArgs> for ItemChanges {
    fn from(args: EditArgs) -> Self {
        let trimmed = |s: String| s.trim().to_string();
        ItemChanges {
            title: args.new_title.map(trimmed),
            publisher: args.publisher.map(trimmed),
            publication_year: args.year,
            author: args.author.map(trimmed),
            issue_number: args.issue_number,
            editor: args.editor.map(trimmed),
        }
    }
}

/// Sort order for `list`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortKey {
    /// Alphabetical by title
    Title,

    /// Oldest publication first
    Year,
}

/// Field searched by `search`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SearchField {
    /// Item title
    Title,

    /// Book author
    Author,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        if let Commands::Config = self.command {
            return show_config(self.catalog);
        }

        let path = match self.catalog {
            Some(path) => path,
            None => config::catalog_path()?,
        };
        let store = JsonFileStore::new(path);
        let mut library = Library::open(store)
            .await
            .context("Failed to load catalog")?;

        match self.command {
            Commands::Add { item } => add_item(&mut library, item).await,
            Commands::List { sort, kind } => {
                list_items(&library, sort, kind);
                Ok(())
            }
            Commands::Search { query, by } => {
                search_items(&library, &query, by);
                Ok(())
            }
            Commands::Show { title } => show_item(&library, &title),
            Commands::Edit { title, changes } => edit_item(&mut library, &title, changes).await,
            Commands::Remove { title } => remove_item(&mut library, &title).await,
            Commands::Stats => {
                show_stats(&library);
                Ok(())
            }
            Commands::Config => Ok(()),
        }
    }
}

/// Print items one per line
fn print_items<'a>(items: impl IntoIterator<Item = &'a Item>) {
    for item in items {
        println!("  {}", item);
    }
}

/// Add an item
async fn add_item<S: CatalogStore>(library: &mut Library<S>, command: AddCommand) -> Result<()> {
    let item = command.into_item()?;
    let title = item.title().to_string();

    library.add(item).await?;
    println!("Added '{}' to library", title);

    Ok(())
}

/// List items in the library
fn list_items<S: CatalogStore>(
    library: &Library<S>,
    sort: Option<SortKey>,
    kind: Option<ItemKind>,
) {
    let catalog = library.catalog();

    if catalog.is_empty() {
        println!("Library is empty. Use 'libris add' to add items.");
        return;
    }

    let mut items: Vec<&Item> = match sort {
        Some(SortKey::Title) => catalog.sorted_by_title(),
        Some(SortKey::Year) => catalog.sorted_by_year(),
        None => catalog.iter().collect(),
    };
    if let Some(kind) = kind {
        items.retain(|item| item.kind() == kind);
    }

    let heading = match sort {
        Some(SortKey::Title) => "Items sorted by title",
        Some(SortKey::Year) => "Items sorted by publication year",
        None => "Library inventory",
    };
    println!("=== {} ({} items) ===", heading, items.len());
    print_items(items);
}

/// Search the library
fn search_items<S: CatalogStore>(library: &Library<S>, query: &str, by: SearchField) {
    let catalog = library.catalog();

    let (results, noun, field) = match by {
        SearchField::Title => (catalog.search_by_title(query), "item", "title"),
        SearchField::Author => (catalog.search_by_author(query), "book", "author"),
    };

    if results.is_empty() {
        println!("No {}s found with {} containing '{}'", noun, field, query);
        return;
    }

    println!("Found {} {}(s):", results.len(), noun);
    print_items(results);
}

/// Show a single item
fn show_item<S: CatalogStore>(library: &Library<S>, title: &str) -> Result<()> {
    let item = library
        .catalog()
        .find_by_title(title)
        .ok_or_else(|| anyhow::anyhow!("Item '{}' not found", title))?;

    println!("{}", item);
    println!("  Kind:      {}", item.kind());
    println!("  Title:     {}", item.title());
    println!("  Publisher: {}", item.publisher());
    println!("  Year:      {}", item.publication_year());
    match item {
        Item::Book(book) => println!("  Author:    {}", book.author()),
        Item::Magazine(magazine) => println!("  Issue:     #{}", magazine.issue_number()),
        Item::Newspaper(newspaper) => println!("  Editor:    {}", newspaper.editor()),
    }

    Ok(())
}

/// Edit an item
async fn edit_item<S: CatalogStore>(
    library: &mut Library<S>,
    title: &str,
    args: EditArgs,
) -> Result<()> {
    let changes = ItemChanges::from(args);
    if changes.is_empty() {
        anyhow::bail!(
            "Nothing to change. Pass at least one of \
             --title, --publisher, --year, --author, --issue, --editor"
        );
    }

    let edited = library
        .edit(title, &changes)
        .await
        .with_context(|| format!("Cannot edit '{}'", title))?;
    println!("Updated: {}", edited);

    Ok(())
}

/// Remove an item
async fn remove_item<S: CatalogStore>(library: &mut Library<S>, title: &str) -> Result<()> {
    let removed = library.remove(title).await?;
    println!("Removed '{}' from library", removed.title());

    Ok(())
}

/// Show catalog statistics
fn show_stats<S: CatalogStore>(library: &Library<S>) {
    let stats = library.catalog().stats();

    println!("Library statistics");
    println!("  Total items: {}", stats.total);
    println!("  Books:       {}", stats.books);
    println!("  Magazines:   {}", stats.magazines);
    println!("  Newspapers:  {}", stats.newspapers);
}

/// Show the resolved configuration (for debugging)
fn show_config(catalog_override: Option<PathBuf>) -> Result<()> {
    let cfg = config::config()?;

    let config_file = cfg
        .config_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none - using defaults)".to_string());

    println!("Config file: {}", config_file);
    println!();
    println!("Paths:");
    println!("  Home:    {}", cfg.home.display());
    match catalog_override {
        Some(path) => println!("  Catalog: {} (from --catalog / LIBRIS_CATALOG)", path.display()),
        None => println!("  Catalog: {}", cfg.catalog.display()),
    }

    Ok(())
}
