//! libris - Library catalog of books, magazines and newspapers
//!
//! Keeps an ordered, duplicate-free catalog of items and persists it as a
//! single JSON file after every change.
//!
//! # Modules
//!
//! - `domain`: Item types and field validation
//! - `library`: The in-memory catalog and the service that saves it
//! - `store`: Snapshot persistence (JSON file, in-memory)
//! - `config`: Where the catalog file lives
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Add items
//! libris add book --title Dune --author "Frank Herbert" --publisher Ace --year 1965
//! libris add magazine --title Time --issue 42 --publisher TimeInc --year 2020
//!
//! # Query
//! libris search dune
//! libris list --sort year
//! libris stats
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;
pub mod store;

// Re-export main types at crate root for convenience
pub use domain::{Book, Item, ItemKind, Magazine, Newspaper, ValidationError};
pub use library::{Catalog, CatalogError, CatalogStats, ItemChanges, Library, LibraryError};
pub use store::{CatalogStore, JsonFileStore, MemoryStore, StoreError};
