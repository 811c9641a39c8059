//! Persistence for the catalog.
//!
//! A store saves and loads whole snapshots of the item list. Stores never
//! hold on to the catalog's items; each call works on a copy.

pub mod json_file;
pub mod memory;
pub mod record;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Item, ValidationError};

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use record::{CatalogFile, ItemRecord, FORMAT_VERSION};

/// Errors that can occur while saving or loading a catalog
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid item at position {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error("Unsupported catalog format version: {0}")]
    UnsupportedVersion(u32),
}

/// Trait for catalog snapshot storage
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Human-readable location of the store (for logs and messages)
    fn location(&self) -> String;

    /// Load the saved items. A store with nothing saved yields an empty list.
    async fn load(&self) -> Result<Vec<Item>, StoreError>;

    /// Replace the saved items with `items`
    async fn save(&self, items: &[Item]) -> Result<(), StoreError>;
}
