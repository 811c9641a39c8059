//! Domain types for the library catalog.
//!
//! This module contains the core data structures:
//! - Item: Books, magazines and newspapers with validated fields
//! - Validation: Field rules shared by construction, setters and loading

pub mod item;
pub mod validation;

// Re-export commonly used types
pub use item::{Book, Item, ItemKind, Magazine, Newspaper, Publication};
pub use validation::{Field, ValidationError};
