//! JSON file store.
//!
//! The whole catalog lives in one pretty-printed JSON file. Saves go through
//! a sibling temporary file that is synced and then renamed over the target,
//! so readers see either the old snapshot or the new one.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::{CatalogFile, CatalogStore, StoreError};
use crate::domain::Item;

/// Catalog store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Path to the catalog file
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the catalog file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path used while a save is in progress
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("catalog.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[async_trait]
impl CatalogStore for JsonFileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<Item>, StoreError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No catalog file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(Self::io_error(&self.path)(err)),
        };

        let file: CatalogFile =
            serde_json::from_slice(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let items = file.into_items()?;
        debug!(path = %self.path.display(), count = items.len(), "Catalog loaded");

        Ok(items)
    }

    async fn save(&self, items: &[Item]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&CatalogFile::from_items(items))?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(Self::io_error(parent))?;
        }

        let temp_path = self.temp_path();
        let written = write_synced(&temp_path, content.as_bytes()).await;
        let result = match written {
            Ok(()) => match fs::rename(&temp_path, &self.path).await {
                Ok(()) => sync_parent_dir(&self.path)
                    .await
                    .map_err(Self::io_error(&self.path)),
                Err(err) => Err(Self::io_error(&self.path)(err)),
            },
            Err(err) => Err(Self::io_error(&temp_path)(err)),
        };

        if result.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        } else {
            debug!(path = %self.path.display(), count = items.len(), "Catalog saved");
        }

        result
    }
}

/// Write a file and flush it to disk
async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}

/// Sync the directory holding `path` so the rename itself is durable
#[cfg(unix)]
async fn sync_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => fs::File::open(parent).await?.sync_all().await,
        None => Ok(()),
    }
}

#[cfg(not(unix))]
async fn sync_parent_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
