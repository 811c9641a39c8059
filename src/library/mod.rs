//! Library catalog management.
//!
//! The catalog is an ordered, duplicate-free list of items held in memory.
//! [`Library`] couples it with a [`crate::store::CatalogStore`] so that every
//! successful change is written out before the call returns.

pub mod catalog;
pub mod service;

pub use catalog::{Catalog, CatalogError, CatalogStats, ItemChanges};
pub use service::{Library, LibraryError};
