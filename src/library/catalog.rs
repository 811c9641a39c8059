//! In-memory catalog of library items.
//!
//! Items are kept in insertion order. Queries and sorted views borrow from
//! the catalog and never reorder what is stored.

use thiserror::Error;

use crate::domain::item::{contains_ignore_case, eq_ignore_case};
use crate::domain::{Field, Item, ItemKind, ValidationError};

/// Errors raised by catalog operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("'{0}' already exists in the library")]
    DuplicateItem(String),

    #[error("Item '{0}' not found")]
    NotFound(String),

    #[error("Invalid item data: {0}")]
    Invalid(#[from] ValidationError),

    #[error("A {kind} has no {field}")]
    FieldNotApplicable { field: Field, kind: ItemKind },
}

/// Catalog of all items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a catalog from a snapshot, rejecting duplicates
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for item in items {
            catalog.add(item)?;
        }
        Ok(catalog)
    }

    /// Add an item unless an equivalent one is already present
    pub fn add(&mut self, item: Item) -> Result<(), CatalogError> {
        if self.items.iter().any(|existing| existing.is_duplicate_of(&item)) {
            return Err(CatalogError::DuplicateItem(item.title().to_string()));
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove the first item whose title matches (case-insensitive)
    pub fn remove(&mut self, title: &str) -> Result<Item, CatalogError> {
        let pos = self
            .position(title)
            .ok_or_else(|| CatalogError::NotFound(title.to_string()))?;
        Ok(self.remove_at(pos))
    }

    /// Remove the item at a position
    pub(crate) fn remove_at(&mut self, index: usize) -> Item {
        self.items.remove(index)
    }

    /// Put an item back at a given position (used to undo a removal)
    pub(crate) fn restore(&mut self, index: usize, item: Item) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// Index of the first item whose title matches (case-insensitive)
    pub fn position(&self, title: &str) -> Option<usize> {
        self.items.iter().position(|i| eq_ignore_case(i.title(), title))
    }

    /// Get the first item whose title matches exactly, ignoring case
    pub fn find_by_title(&self, title: &str) -> Option<&Item> {
        self.items.iter().find(|i| eq_ignore_case(i.title(), title))
    }

    /// All items whose title contains the query (case-insensitive)
    pub fn search_by_title(&self, query: &str) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| contains_ignore_case(item.title(), query))
            .collect()
    }

    /// Books whose author contains the query (case-insensitive)
    pub fn search_by_author(&self, query: &str) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| {
                item.author()
                    .is_some_and(|author| contains_ignore_case(author, query))
            })
            .collect()
    }

    /// Items ordered by title, ignoring case. Equal titles keep insertion order.
    pub fn sorted_by_title(&self) -> Vec<&Item> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by_cached_key(|item| item.title().to_lowercase());
        items
    }

    /// Items ordered by publication year. Equal years keep insertion order.
    pub fn sorted_by_year(&self) -> Vec<&Item> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by_key(|item| item.publication_year());
        items
    }

    /// Items of one kind, in insertion order
    pub fn items_of_kind(&self, kind: ItemKind) -> Vec<&Item> {
        self.items.iter().filter(|item| item.kind() == kind).collect()
    }

    pub fn count_by_kind(&self, kind: ItemKind) -> usize {
        self.items.iter().filter(|item| item.kind() == kind).count()
    }

    /// Totals per kind
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total: self.len(),
            books: self.count_by_kind(ItemKind::Book),
            magazines: self.count_by_kind(ItemKind::Magazine),
            newspapers: self.count_by_kind(ItemKind::Newspaper),
        }
    }

    /// Apply a set of field changes to the item with the given title.
    ///
    /// All changes are applied to a copy first; the stored item is only
    /// replaced if every change validates and the result does not duplicate
    /// another item.
    pub fn edit(&mut self, title: &str, changes: &ItemChanges) -> Result<&Item, CatalogError> {
        let pos = self
            .position(title)
            .ok_or_else(|| CatalogError::NotFound(title.to_string()))?;

        let mut edited = self.items[pos].clone();
        changes.apply(&mut edited)?;

        let clash = self
            .items
            .iter()
            .enumerate()
            .any(|(i, other)| i != pos && other.is_duplicate_of(&edited));
        if clash {
            return Err(CatalogError::DuplicateItem(edited.title().to_string()));
        }

        self.items[pos] = edited;
        Ok(&self.items[pos])
    }

    /// Replace the item at a position (used to undo an edit)
    pub(crate) fn replace(&mut self, index: usize, item: Item) {
        if let Some(slot) = self.items.get_mut(index) {
            *slot = item;
        }
    }

    /// All items in insertion order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Get the number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Item counts per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub books: usize,
    pub magazines: usize,
    pub newspapers: usize,
}

/// Field updates for an existing item. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    pub title: Option<String>,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub author: Option<String>,
    pub issue_number: Option<i32>,
    pub editor: Option<String>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(&self, item: &mut Item) -> Result<(), CatalogError> {
        let kind = item.kind();
        let not_applicable = |field| CatalogError::FieldNotApplicable { field, kind };

        if let Some(title) = &self.title {
            item.publication_mut().set_title(title.as_str())?;
        }
        if let Some(publisher) = &self.publisher {
            item.publication_mut().set_publisher(publisher.as_str())?;
        }
        if let Some(year) = self.publication_year {
            item.publication_mut().set_publication_year(year)?;
        }

        if let Some(author) = &self.author {
            match item {
                Item::Book(book) => book.set_author(author.as_str())?,
                _ => return Err(not_applicable(Field::Author)),
            }
        }
        if let Some(issue_number) = self.issue_number {
            match item {
                Item::Magazine(magazine) => magazine.set_issue_number(issue_number)?,
                _ => return Err(not_applicable(Field::IssueNumber)),
            }
        }
        if let Some(editor) = &self.editor {
            match item {
                Item::Newspaper(newspaper) => newspaper.set_editor(editor.as_str())?,
                _ => return Err(not_applicable(Field::Editor)),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .add(Item::book("Dune", "Frank Herbert", "Ace", 1965).unwrap())
            .unwrap();
        catalog
            .add(Item::magazine("Time", 42, "TimeInc", 2020).unwrap())
            .unwrap();
        catalog
            .add(Item::newspaper("The Times", "J. Witherow", "News UK", 2021).unwrap())
            .unwrap();
        catalog
            .add(Item::book("Children of Dune", "Frank Herbert", "Putnam", 1976).unwrap())
            .unwrap();
        catalog
    }

    #[test]
    fn test_catalog_add_and_find() {
        let catalog = sample();

        assert_eq!(catalog.len(), 4);
        assert!(catalog.find_by_title("dune").is_some());
        assert!(catalog.find_by_title("Dun").is_none());
    }

    #[test]
    fn test_catalog_rejects_duplicate() {
        let mut catalog = sample();
        let dup = Item::book("DUNE", "frank herbert", "ACE", 1965).unwrap();

        let result = catalog.add(dup);
        assert_eq!(result, Err(CatalogError::DuplicateItem("DUNE".to_string())));
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_catalog_remove() {
        let mut catalog = sample();

        let removed = catalog.remove("THE TIMES").unwrap();
        assert_eq!(removed.kind(), ItemKind::Newspaper);
        assert_eq!(catalog.len(), 3);
        assert!(catalog.find_by_title("The Times").is_none());

        assert_eq!(
            catalog.remove("The Times"),
            Err(CatalogError::NotFound("The Times".to_string()))
        );
    }

    #[test]
    fn test_catalog_search() {
        let catalog = sample();

        assert_eq!(catalog.search_by_title("DUNE").len(), 2);
        assert_eq!(catalog.search_by_title("ime").len(), 2);
        assert_eq!(catalog.search_by_title("").len(), 4);
        assert!(catalog.search_by_title("python").is_empty());

        // Author search only looks at books
        assert_eq!(catalog.search_by_author("herbert").len(), 2);
        assert!(catalog.search_by_author("witherow").is_empty());
    }

    #[test]
    fn test_sorted_views_leave_storage_alone() {
        let catalog = sample();

        let titles: Vec<_> = catalog.sorted_by_title().iter().map(|i| i.title()).collect();
        assert_eq!(titles, vec!["Children of Dune", "Dune", "The Times", "Time"]);

        let years: Vec<_> = catalog
            .sorted_by_year()
            .iter()
            .map(|i| i.publication_year())
            .collect();
        assert_eq!(years, vec![1965, 1976, 2020, 2021]);

        assert_eq!(catalog.items()[0].title(), "Dune");
        assert_eq!(catalog.items()[3].title(), "Children of Dune");
    }

    #[test]
    fn test_stats() {
        let catalog = sample();

        assert_eq!(
            catalog.stats(),
            CatalogStats {
                total: 4,
                books: 2,
                magazines: 1,
                newspapers: 1,
            }
        );
        assert_eq!(catalog.items_of_kind(ItemKind::Book).len(), 2);
    }

    #[test]
    fn test_edit_is_atomic() {
        let mut catalog = sample();

        // Second change is invalid, so the first must not stick either
        let changes = ItemChanges {
            publisher: Some("Chilton".to_string()),
            publication_year: Some(10),
            ..Default::default()
        };
        assert!(matches!(
            catalog.edit("Dune", &changes),
            Err(CatalogError::Invalid(ValidationError::YearOutOfRange { .. }))
        ));
        assert_eq!(catalog.find_by_title("Dune").unwrap().publisher(), "Ace");

        let changes = ItemChanges {
            publisher: Some("Chilton".to_string()),
            ..Default::default()
        };
        let edited = catalog.edit("dune", &changes).unwrap();
        assert_eq!(edited.publisher(), "Chilton");
    }

    #[test]
    fn test_edit_rejects_inapplicable_field_and_clash() {
        let mut catalog = sample();

        let changes = ItemChanges {
            author: Some("Someone".to_string()),
            ..Default::default()
        };
        assert_eq!(
            catalog.edit("Time", &changes),
            Err(CatalogError::FieldNotApplicable {
                field: Field::Author,
                kind: ItemKind::Magazine,
            })
        );

        catalog
            .add(Item::magazine("Time", 43, "TimeInc", 2020).unwrap())
            .unwrap();
        let changes = ItemChanges {
            issue_number: Some(42),
            ..Default::default()
        };
        // Both magazines are titled "Time"; the first one (issue 42) is edited
        // to 42 again, which is a no-op, not a clash with itself.
        assert!(catalog.edit("Time", &changes).is_ok());

        let changes = ItemChanges {
            title: Some("Dune".to_string()),
            publisher: Some("Ace".to_string()),
            publication_year: Some(1965),
            author: Some("Frank Herbert".to_string()),
            ..Default::default()
        };
        assert_eq!(
            catalog.edit("Children of Dune", &changes),
            Err(CatalogError::DuplicateItem("Dune".to_string()))
        );
    }

    #[test]
    fn test_from_items_rejects_duplicates() {
        let items = vec![
            Item::magazine("Time", 42, "TimeInc", 2020).unwrap(),
            Item::magazine("time", 42, "timeinc", 2020).unwrap(),
        ];
        assert!(matches!(
            Catalog::from_items(items),
            Err(CatalogError::DuplicateItem(_))
        ));
    }
}
