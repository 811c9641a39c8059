//! Library service: the catalog plus its store.
//!
//! Every mutation is applied in memory, then saved. When the save fails the
//! mutation is undone, so the in-memory catalog always matches the last
//! snapshot that was written successfully.

use thiserror::Error;
use tracing::{debug, warn};

use super::catalog::{Catalog, CatalogError, ItemChanges};
use crate::domain::Item;
use crate::store::{CatalogStore, StoreError};

/// Errors returned by the library service
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Catalog file lists '{0}' more than once")]
    DuplicateInFile(String),
}

/// A catalog bound to a store
pub struct Library<S: CatalogStore> {
    catalog: Catalog,
    store: S,
}

impl<S: CatalogStore> Library<S> {
    /// Load the catalog from the store
    pub async fn open(store: S) -> Result<Self, LibraryError> {
        let items = store.load().await?;
        let catalog = Catalog::from_items(items).map_err(|err| match err {
            CatalogError::DuplicateItem(title) => LibraryError::DuplicateInFile(title),
            other => LibraryError::Catalog(other),
        })?;

        debug!(
            location = %store.location(),
            count = catalog.len(),
            "Library opened"
        );

        Ok(Self { catalog, store })
    }

    /// Read access to the catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add an item and save
    pub async fn add(&mut self, item: Item) -> Result<(), LibraryError> {
        self.catalog.add(item)?;

        if let Err(err) = self.persist().await {
            warn!(error = %err, "Save failed, undoing add");
            let last = self.catalog.len() - 1;
            self.catalog.remove_at(last);
            return Err(err.into());
        }

        Ok(())
    }

    /// Remove the first item with the given title and save
    pub async fn remove(&mut self, title: &str) -> Result<Item, LibraryError> {
        let index = self
            .catalog
            .position(title)
            .ok_or_else(|| CatalogError::NotFound(title.to_string()))?;
        let removed = self.catalog.remove_at(index);

        if let Err(err) = self.persist().await {
            warn!(error = %err, "Save failed, undoing remove");
            self.catalog.restore(index, removed);
            return Err(err.into());
        }

        Ok(removed)
    }

    /// Edit the first item with the given title and save
    pub async fn edit(&mut self, title: &str, changes: &ItemChanges) -> Result<Item, LibraryError> {
        let index = self
            .catalog
            .position(title)
            .ok_or_else(|| CatalogError::NotFound(title.to_string()))?;
        let previous = self.catalog.items()[index].clone();
        let edited = self.catalog.edit(title, changes)?.clone();

        if let Err(err) = self.persist().await {
            warn!(error = %err, "Save failed, undoing edit");
            self.catalog.replace(index, previous);
            return Err(err.into());
        }

        Ok(edited)
    }

    async fn persist(&self) -> Result<(), StoreError> {
        self.store.save(self.catalog.items()).await
    }
}
