//! On-disk representation of catalog items.
//!
//! Each record carries an explicit `kind` tag next to its fields. Records are
//! plain data: converting one back into an [`Item`] re-runs every validation
//! rule, so a hand-edited file cannot smuggle in an invalid item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::domain::{Item, ValidationError};

/// Current catalog file format version
pub const FORMAT_VERSION: u32 = 1;

/// Top-level catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Catalog format version
    pub version: u32,

    /// When the snapshot was written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,

    /// All items, in catalog order
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

impl CatalogFile {
    /// Snapshot a list of items
    pub fn from_items(items: &[Item]) -> Self {
        Self {
            version: FORMAT_VERSION,
            saved_at: Some(Utc::now()),
            items: items.iter().map(ItemRecord::from).collect(),
        }
    }

    /// Validate every record and rebuild the items. The first invalid
    /// record fails the whole file.
    pub fn into_items(self) -> Result<Vec<Item>, StoreError> {
        if self.version != FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion(self.version));
        }

        self.items
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Item::try_from(record).map_err(|source| StoreError::InvalidRecord { index, source })
            })
            .collect()
    }
}

/// A single item as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemRecord {
    Book {
        title: String,
        author: String,
        publisher: String,
        publication_year: i32,
    },
    Magazine {
        title: String,
        issue_number: i32,
        publisher: String,
        publication_year: i32,
    },
    Newspaper {
        title: String,
        editor: String,
        publisher: String,
        publication_year: i32,
    },
}

impl From<&Item> for ItemRecord {
    fn from(item: &Item) -> Self {
        let title = item.title().to_string();
        let publisher = item.publisher().to_string();
        let publication_year = item.publication_year();

        match item {
            Item::Book(book) => ItemRecord::Book {
                title,
                author: book.author().to_string(),
                publisher,
                publication_year,
            },
            Item::Magazine(magazine) => ItemRecord::Magazine {
                title,
                issue_number: magazine.issue_number(),
                publisher,
                publication_year,
            },
            Item::Newspaper(newspaper) => ItemRecord::Newspaper {
                title,
                editor: newspaper.editor().to_string(),
                publisher,
                publication_year,
            },
        }
    }
}

impl TryFrom<ItemRecord> for Item {
    type Error = ValidationError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        match record {
            ItemRecord::Book {
                title,
                author,
                publisher,
                publication_year,
            } => Item::book(title, author, publisher, publication_year),
            ItemRecord::Magazine {
                title,
                issue_number,
                publisher,
                publication_year,
            } => Item::magazine(title, issue_number, publisher, publication_year),
            ItemRecord::Newspaper {
                title,
                editor,
                publisher,
                publication_year,
            } => Item::newspaper(title, editor, publisher, publication_year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tag_format() {
        let item = Item::magazine("Time", 42, "TimeInc", 2020).unwrap();
        let json = serde_json::to_value(ItemRecord::from(&item)).unwrap();

        assert_eq!(json["kind"], "magazine");
        assert_eq!(json["title"], "Time");
        assert_eq!(json["issue_number"], 42);
        assert_eq!(json["publisher"], "TimeInc");
        assert_eq!(json["publication_year"], 2020);
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let json = r#"{"kind": "pamphlet", "title": "x", "publisher": "y", "publication_year": 2000}"#;
        assert!(serde_json::from_str::<ItemRecord>(json).is_err());
    }

    #[test]
    fn test_invalid_record_reports_index() {
        let file = CatalogFile {
            version: FORMAT_VERSION,
            saved_at: None,
            items: vec![
                ItemRecord::Book {
                    title: "Dune".to_string(),
                    author: "Frank Herbert".to_string(),
                    publisher: "Ace".to_string(),
                    publication_year: 1965,
                },
                ItemRecord::Magazine {
                    title: "Time".to_string(),
                    issue_number: -1,
                    publisher: "TimeInc".to_string(),
                    publication_year: 2020,
                },
            ],
        };

        match file.into_items() {
            Err(StoreError::InvalidRecord { index, source }) => {
                assert_eq!(index, 1);
                assert_eq!(source, ValidationError::NonPositiveIssue(-1));
            }
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_version_checked() {
        let file = CatalogFile {
            version: 7,
            saved_at: None,
            items: Vec::new(),
        };
        assert!(matches!(file.into_items(), Err(StoreError::UnsupportedVersion(7))));
    }
}
