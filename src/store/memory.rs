//! In-memory store.
//!
//! Keeps the last saved snapshot in its encoded record form, so loading goes
//! through the same validation as the file store.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{CatalogFile, CatalogStore, StoreError};
use crate::domain::Item;

/// Catalog store that never touches the filesystem
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<CatalogFile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot
    pub fn with_snapshot(file: CatalogFile) -> Self {
        Self {
            snapshot: Mutex::new(Some(file)),
        }
    }

    /// Number of items in the last saved snapshot
    pub fn saved_len(&self) -> usize {
        self.snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map_or(0, |file| file.items.len())
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    fn location(&self) -> String {
        "memory".to_string()
    }

    async fn load(&self) -> Result<Vec<Item>, StoreError> {
        let snapshot = self
            .snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        match snapshot {
            Some(file) => file.into_items(),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, items: &[Item]) -> Result<(), StoreError> {
        let file = CatalogFile::from_items(items);
        *self
            .snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(file);
        Ok(())
    }
}
