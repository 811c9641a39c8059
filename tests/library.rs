//! Library Service Integration Tests
//!
//! Tests for save-after-mutation, rollback on failed saves, and startup loading.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use libris::store::{CatalogStore, JsonFileStore, MemoryStore, StoreError};
use libris::{CatalogError, Item, ItemChanges, ItemKind, Library, LibraryError};
use tempfile::TempDir;

/// Store that can be switched into failing every save
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_saves: AtomicBool,
}

impl FlakyStore {
    fn set_failing(&self, failing: bool) {
        self.fail_saves.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogStore for FlakyStore {
    fn location(&self) -> String {
        "flaky".to_string()
    }

    async fn load(&self) -> Result<Vec<Item>, StoreError> {
        self.inner.load().await
    }

    async fn save(&self, items: &[Item]) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                path: "flaky".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            });
        }
        self.inner.save(items).await
    }
}

fn dune() -> Item {
    Item::book("Dune", "Herbert", "Ace", 1965).unwrap()
}

#[tokio::test]
async fn test_changes_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.json");

    {
        let mut library = Library::open(JsonFileStore::new(&path)).await.unwrap();
        library.add(dune()).await.unwrap();
        library
            .add(Item::magazine("Time", 42, "TimeInc", 2020).unwrap())
            .await
            .unwrap();
        library
            .add(Item::magazine("Time", 43, "TimeInc", 2020).unwrap())
            .await
            .unwrap();
        library.remove("dune").await.unwrap();
    }

    let library = Library::open(JsonFileStore::new(&path)).await.unwrap();
    let catalog = library.catalog();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.count_by_kind(ItemKind::Magazine), 2);
    assert!(catalog.find_by_title("Dune").is_none());
}

#[tokio::test]
async fn test_duplicate_add_scenario() {
    let temp = TempDir::new().unwrap();
    let mut library = Library::open(JsonFileStore::new(temp.path().join("catalog.json")))
        .await
        .unwrap();

    library.add(dune()).await.unwrap();
    let err = library.add(dune()).await.unwrap_err();

    assert!(matches!(
        err,
        LibraryError::Catalog(CatalogError::DuplicateItem(ref title)) if title == "Dune"
    ));
    assert_eq!(library.catalog().len(), 1);
}

#[tokio::test]
async fn test_failed_save_rolls_back_add() {
    let mut library = Library::open(FlakyStore::default()).await.unwrap();
    library.add(dune()).await.unwrap();

    library.store().set_failing(true);
    let err = library
        .add(Item::newspaper("The Times", "J. Witherow", "News UK", 2021).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, LibraryError::Store(StoreError::Io { .. })));
    assert_eq!(library.catalog().len(), 1);
    assert_eq!(library.catalog().count_by_kind(ItemKind::Newspaper), 0);
}

#[tokio::test]
async fn test_failed_save_rolls_back_remove() {
    let mut library = Library::open(FlakyStore::default()).await.unwrap();
    library
        .add(Item::magazine("Time", 42, "TimeInc", 2020).unwrap())
        .await
        .unwrap();
    library.add(dune()).await.unwrap();
    library
        .add(Item::newspaper("The Times", "J. Witherow", "News UK", 2021).unwrap())
        .await
        .unwrap();

    library.store().set_failing(true);
    assert!(library.remove("Dune").await.is_err());

    // Restored at its original position
    let titles: Vec<_> = library.catalog().iter().map(|i| i.title()).collect();
    assert_eq!(titles, vec!["Time", "Dune", "The Times"]);
}

#[tokio::test]
async fn test_failed_save_rolls_back_edit() {
    let mut library = Library::open(FlakyStore::default()).await.unwrap();
    library.add(dune()).await.unwrap();

    library.store().set_failing(true);
    let changes = ItemChanges {
        publisher: Some("Chilton".to_string()),
        ..Default::default()
    };
    assert!(library.edit("Dune", &changes).await.is_err());
    assert_eq!(library.catalog().find_by_title("Dune").unwrap().publisher(), "Ace");

    library.store().set_failing(false);
    let edited = library.edit("Dune", &changes).await.unwrap();
    assert_eq!(edited.publisher(), "Chilton");
    assert_eq!(library.store().load().await.unwrap(), vec![edited]);
}

#[tokio::test]
async fn test_remove_missing_title_is_not_found() {
    let mut library = Library::open(MemoryStore::new()).await.unwrap();

    let err = library.remove("Ghost").await.unwrap_err();
    assert!(matches!(
        err,
        LibraryError::Catalog(CatalogError::NotFound(_))
    ));
    assert_eq!(library.store().saved_len(), 0);
}

#[tokio::test]
async fn test_open_rejects_duplicates_in_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"{"version": 1, "items": [
            {"kind": "magazine", "title": "Time", "issue_number": 42, "publisher": "TimeInc", "publication_year": 2020},
            {"kind": "magazine", "title": "TIME", "issue_number": 42, "publisher": "timeinc", "publication_year": 2020}
        ]}"#,
    )
    .unwrap();

    let result = Library::open(JsonFileStore::new(&path)).await;
    assert!(matches!(result, Err(LibraryError::DuplicateInFile(ref t)) if t == "TIME"));
}

#[tokio::test]
async fn test_open_surfaces_parse_failure() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.json");
    std::fs::write(&path, "true").unwrap();

    let result = Library::open(JsonFileStore::new(&path)).await;
    assert!(matches!(
        result,
        Err(LibraryError::Store(StoreError::Parse { .. }))
    ));
}
