//! Catalog items: books, magazines and newspapers.
//!
//! Every item is built through a validating constructor and can only be
//! changed through setters that re-run the same rules, so an `Item` is never
//! observable with an invalid field.

use super::validation::{
    validate_author, validate_editor, validate_issue_number, validate_publication_year,
    validate_publisher, validate_title, ValidationError,
};

/// Kind tag of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Book,
    Magazine,
    Newspaper,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Book => write!(f, "Book"),
            ItemKind::Magazine => write!(f, "Magazine"),
            ItemKind::Newspaper => write!(f, "Newspaper"),
        }
    }
}

impl std::str::FromStr for ItemKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "book" => Ok(ItemKind::Book),
            "magazine" | "mag" => Ok(ItemKind::Magazine),
            "newspaper" | "paper" => Ok(ItemKind::Newspaper),
            _ => anyhow::bail!("Unknown item kind: {}", s),
        }
    }
}

/// Case-insensitive string equality used for titles, publishers and names
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_uppercase() == b.to_uppercase()
}

/// Case-insensitive substring test
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_uppercase().contains(&needle.to_uppercase())
}

/// Attributes shared by every kind of item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    title: String,
    publisher: String,
    publication_year: i32,
}

impl Publication {
    /// Validate and build the shared attributes
    pub fn new(
        title: impl Into<String>,
        publisher: impl Into<String>,
        publication_year: i32,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let publisher = publisher.into();

        validate_title(&title)?;
        validate_publisher(&publisher)?;
        validate_publication_year(publication_year)?;

        Ok(Self {
            title,
            publisher,
            publication_year,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn publication_year(&self) -> i32 {
        self.publication_year
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
        let title = title.into();
        validate_title(&title)?;
        self.title = title;
        Ok(())
    }

    pub fn set_publisher(&mut self, publisher: impl Into<String>) -> Result<(), ValidationError> {
        let publisher = publisher.into();
        validate_publisher(&publisher)?;
        self.publisher = publisher;
        Ok(())
    }

    pub fn set_publication_year(&mut self, year: i32) -> Result<(), ValidationError> {
        validate_publication_year(year)?;
        self.publication_year = year;
        Ok(())
    }

    /// Whether the shared attributes match (strings compared case-insensitively)
    fn matches(&self, other: &Publication) -> bool {
        eq_ignore_case(&self.title, &other.title)
            && eq_ignore_case(&self.publisher, &other.publisher)
            && self.publication_year == other.publication_year
    }
}

/// A book, identified by its author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    publication: Publication,
    author: String,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        publisher: impl Into<String>,
        publication_year: i32,
    ) -> Result<Self, ValidationError> {
        let publication = Publication::new(title, publisher, publication_year)?;
        let author = author.into();
        validate_author(&author)?;

        Ok(Self {
            publication,
            author,
        })
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn set_author(&mut self, author: impl Into<String>) -> Result<(), ValidationError> {
        let author = author.into();
        validate_author(&author)?;
        self.author = author;
        Ok(())
    }
}

/// A magazine issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Magazine {
    publication: Publication,
    issue_number: i32,
}

impl Magazine {
    pub fn new(
        title: impl Into<String>,
        issue_number: i32,
        publisher: impl Into<String>,
        publication_year: i32,
    ) -> Result<Self, ValidationError> {
        let publication = Publication::new(title, publisher, publication_year)?;
        validate_issue_number(issue_number)?;

        Ok(Self {
            publication,
            issue_number,
        })
    }

    pub fn issue_number(&self) -> i32 {
        self.issue_number
    }

    pub fn set_issue_number(&mut self, issue_number: i32) -> Result<(), ValidationError> {
        validate_issue_number(issue_number)?;
        self.issue_number = issue_number;
        Ok(())
    }
}

/// A newspaper, identified by its editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Newspaper {
    publication: Publication,
    editor: String,
}

impl Newspaper {
    pub fn new(
        title: impl Into<String>,
        editor: impl Into<String>,
        publisher: impl Into<String>,
        publication_year: i32,
    ) -> Result<Self, ValidationError> {
        let publication = Publication::new(title, publisher, publication_year)?;
        let editor = editor.into();
        validate_editor(&editor)?;

        Ok(Self {
            publication,
            editor,
        })
    }

    pub fn editor(&self) -> &str {
        &self.editor
    }

    pub fn set_editor(&mut self, editor: impl Into<String>) -> Result<(), ValidationError> {
        let editor = editor.into();
        validate_editor(&editor)?;
        self.editor = editor;
        Ok(())
    }
}

/// A single entry in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Book(Book),
    Magazine(Magazine),
    Newspaper(Newspaper),
}

impl Item {
    /// Build a validated book
    pub fn book(
        title: impl Into<String>,
        author: impl Into<String>,
        publisher: impl Into<String>,
        publication_year: i32,
    ) -> Result<Self, ValidationError> {
        Book::new(title, author, publisher, publication_year).map(Item::Book)
    }

    /// Build a validated magazine
    pub fn magazine(
        title: impl Into<String>,
        issue_number: i32,
        publisher: impl Into<String>,
        publication_year: i32,
    ) -> Result<Self, ValidationError> {
        Magazine::new(title, issue_number, publisher, publication_year).map(Item::Magazine)
    }

    /// Build a validated newspaper
    pub fn newspaper(
        title: impl Into<String>,
        editor: impl Into<String>,
        publisher: impl Into<String>,
        publication_year: i32,
    ) -> Result<Self, ValidationError> {
        Newspaper::new(title, editor, publisher, publication_year).map(Item::Newspaper)
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Book(_) => ItemKind::Book,
            Item::Magazine(_) => ItemKind::Magazine,
            Item::Newspaper(_) => ItemKind::Newspaper,
        }
    }

    pub fn publication(&self) -> &Publication {
        match self {
            Item::Book(b) => &b.publication,
            Item::Magazine(m) => &m.publication,
            Item::Newspaper(n) => &n.publication,
        }
    }

    pub fn publication_mut(&mut self) -> &mut Publication {
        match self {
            Item::Book(b) => &mut b.publication,
            Item::Magazine(m) => &mut m.publication,
            Item::Newspaper(n) => &mut n.publication,
        }
    }

    pub fn title(&self) -> &str {
        self.publication().title()
    }

    pub fn publisher(&self) -> &str {
        self.publication().publisher()
    }

    pub fn publication_year(&self) -> i32 {
        self.publication().publication_year()
    }

    /// Author, for books only
    pub fn author(&self) -> Option<&str> {
        match self {
            Item::Book(b) => Some(b.author()),
            _ => None,
        }
    }

    /// Two items are duplicates when they are the same kind, share title,
    /// publisher and year, and agree on the kind-specific field.
    pub fn is_duplicate_of(&self, other: &Item) -> bool {
        if !self.publication().matches(other.publication()) {
            return false;
        }

        match (self, other) {
            (Item::Book(a), Item::Book(b)) => eq_ignore_case(&a.author, &b.author),
            (Item::Magazine(a), Item::Magazine(b)) => a.issue_number == b.issue_number,
            (Item::Newspaper(a), Item::Newspaper(b)) => eq_ignore_case(&a.editor, &b.editor),
            _ => false,
        }
    }
}

impl From<Book> for Item {
    fn from(book: Book) -> Self {
        Item::Book(book)
    }
}

impl From<Magazine> for Item {
    fn from(magazine: Magazine) -> Self {
        Item::Magazine(magazine)
    }
}

impl From<Newspaper> for Item {
    fn from(newspaper: Newspaper) -> Self {
        Item::Newspaper(newspaper)
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = self.publication();
        match self {
            Item::Book(b) => write!(
                f,
                "[BOOK] '{}' by {} ({}), published by {}",
                p.title, b.author, p.publication_year, p.publisher
            ),
            Item::Magazine(m) => write!(
                f,
                "[MAGAZINE] '{}' - Issue #{} ({}), published by {}",
                p.title, m.issue_number, p.publication_year, p.publisher
            ),
            Item::Newspaper(n) => write!(
                f,
                "[NEWSPAPER] '{}' - Edited by {} ({}), published by {}",
                p.title, n.editor, p.publication_year, p.publisher
            ),
        }
    }
}
