//! Behavior every `ItemStore` backend must share.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::TimeDelta;
use itemstore_persistence::core::ItemStore;
use itemstore_persistence::types::{Item, ItemId};
use itemstore_persistence::{ErrorKind, StorageError};

use super::fixtures::{sample_item, sample_items};

fn token_of(item: &Item) -> String {
    item.version_token().expect("saved item has a token")
}

// ============================================================================
// Save
// ============================================================================

pub async fn save_assigns_id_and_timestamps<S: ItemStore>(store: &S) {
    let saved = store.save(sample_item("Apple")).await.unwrap();

    assert!(!saved.id.is_nil());
    assert!(saved.storage_key.is_some());
    assert!(saved.created_on.is_some());
    assert_eq!(saved.created_on, saved.updated_on);
    assert_eq!(saved.name, "Apple");
    assert!(saved.active);
}

pub async fn save_keeps_client_id<S: ItemStore>(store: &S) {
    let id = ItemId::generate();
    let item = Item {
        id,
        ..sample_item("Apple")
    };

    let saved = store.save(item).await.unwrap();
    assert_eq!(saved.id, id);
    assert_eq!(store.get_by_id(id).await.unwrap().name, "Apple");
}

pub async fn save_duplicate_id_is_conflict<S: ItemStore>(store: &S) {
    let first = store.save(sample_item("Apple")).await.unwrap();
    let second = Item {
        id: first.id,
        ..sample_item("Banana")
    };

    let result = store.save(second).await;
    assert!(matches!(result, Err(StorageError::Conflict { id }) if id == first.id));

    let stored = store.get_by_id(first.id).await.unwrap();
    assert_eq!(stored.name, "Apple");
}

// ============================================================================
// Read
// ============================================================================

pub async fn get_by_id_returns_saved_item<S: ItemStore>(store: &S) {
    let saved = store.save(sample_item("Apple")).await.unwrap();
    let read = store.get_by_id(saved.id).await.unwrap();
    assert_eq!(read, saved);
    assert_eq!(read.version_token(), saved.version_token());
}

pub async fn get_missing_is_not_found<S: ItemStore>(store: &S) {
    let id = ItemId::generate();
    let err = store.get_by_id(id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), format!("item with id {} not found", id));
}

pub async fn get_all_empty<S: ItemStore>(store: &S) {
    let all = store.get_all().await.unwrap();
    assert!(all.is_empty());
}

pub async fn get_all_returns_every_item<S: ItemStore>(store: &S) {
    let mut expected = HashSet::new();
    for item in sample_items() {
        expected.insert(store.save(item).await.unwrap().id);
    }

    let all = store.get_all().await.unwrap();
    assert_eq!(all.len(), expected.len());
    assert_eq!(all.iter().map(|i| i.id).collect::<HashSet<_>>(), expected);

    let mut sorted = all.clone();
    sorted.sort_by(|a, b| a.created_on.cmp(&b.created_on).then(a.id.cmp(&b.id)));
    assert_eq!(all, sorted);
}

// ============================================================================
// Delete
// ============================================================================

pub async fn delete_removes_item<S: ItemStore>(store: &S) {
    let keep = store.save(sample_item("Apple")).await.unwrap();
    let gone = store.save(sample_item("Banana")).await.unwrap();

    store.delete_by_id(gone.id).await.unwrap();

    assert!(store.get_by_id(gone.id).await.unwrap_err().is_not_found());
    assert!(store.get_by_id(keep.id).await.is_ok());
    assert_eq!(store.get_all().await.unwrap().len(), 1);

    let again = store.delete_by_id(gone.id).await;
    assert!(matches!(again, Err(StorageError::NotFound { .. })));
}

pub async fn delete_missing_is_not_found<S: ItemStore>(store: &S) {
    let result = store.delete_by_id(ItemId::generate()).await;
    assert!(matches!(result, Err(StorageError::NotFound { .. })));
}

// ============================================================================
// Conditional Update
// ============================================================================

pub async fn update_with_current_token<S: ItemStore>(store: &S) {
    let saved = store.save(sample_item("Apple")).await.unwrap();

    let mut changed = saved.clone();
    changed.name = "Apricot".to_string();
    changed.value = 42;
    changed.description = "orange".to_string();
    changed.active = false;

    let updated = store.update(changed, &token_of(&saved)).await.unwrap();
    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.storage_key, saved.storage_key);
    assert_eq!(updated.created_on, saved.created_on);
    assert!(updated.updated_on > saved.updated_on);
    assert_eq!(updated.name, "Apricot");
    assert_eq!(updated.value, 42);
    assert!(!updated.active);

    let read = store.get_by_id(saved.id).await.unwrap();
    assert_eq!(read, updated);
}

pub async fn update_ignores_client_timestamps<S: ItemStore>(store: &S) {
    let saved = store.save(sample_item("Apple")).await.unwrap();
    let token = token_of(&saved);

    let mut changed = saved.clone();
    changed.created_on = saved.created_on.map(|t| t - TimeDelta::days(30));
    changed.updated_on = saved.updated_on.map(|t| t - TimeDelta::days(30));

    let updated = store.update(changed, &token).await.unwrap();
    assert_eq!(updated.created_on, saved.created_on);
    assert!(updated.updated_on > saved.updated_on);
}

pub async fn update_with_stale_token_is_outdated<S: ItemStore>(store: &S) {
    let saved = store.save(sample_item("Apple")).await.unwrap();

    let mut changed = saved.clone();
    changed.name = "Never written".to_string();

    let result = store.update(changed, "2000-01-01T00:00:00.000Z").await;
    assert!(matches!(result, Err(StorageError::Outdated { id, .. }) if id == saved.id));

    let read = store.get_by_id(saved.id).await.unwrap();
    assert_eq!(read, saved);
}

pub async fn update_missing_is_not_found<S: ItemStore>(store: &S) {
    let ghost = Item {
        id: ItemId::generate(),
        ..sample_item("Ghost")
    };
    let result = store.update(ghost, "2000-01-01T00:00:00.000Z").await;
    assert!(matches!(result, Err(StorageError::NotFound { .. })));
}

pub async fn token_chain_across_updates<S: ItemStore>(store: &S) {
    let v1 = store.save(sample_item("Apple")).await.unwrap();

    let v2 = store.update(v1.clone(), &token_of(&v1)).await.unwrap();
    let v3 = store.update(v2.clone(), &token_of(&v2)).await.unwrap();
    assert!(v3.updated_on > v2.updated_on);

    let stale = store.update(v1.clone(), &token_of(&v1)).await;
    assert!(matches!(stale, Err(StorageError::Outdated { .. })));

    let stale = store.update(v2.clone(), &token_of(&v2)).await;
    assert!(matches!(stale, Err(StorageError::Outdated { .. })));
}

pub async fn concurrent_updates_one_wins<S: ItemStore + 'static>(store: Arc<S>) {
    let saved = store.save(sample_item("Apple")).await.unwrap();
    let token = token_of(&saved);

    let mut tasks = Vec::new();
    for value in [1, 2] {
        let store = Arc::clone(&store);
        let token = token.clone();
        let mut changed = saved.clone();
        changed.value = value;
        tasks.push(tokio::spawn(async move { store.update(changed, &token).await }));
    }

    let mut winners = Vec::new();
    for task in tasks {
        match task.await.unwrap() {
            Ok(item) => winners.push(item),
            Err(err) => assert!(matches!(
                err.kind(),
                ErrorKind::Outdated | ErrorKind::Unclassified
            )),
        }
    }

    assert_eq!(winners.len(), 1);
    let stored = store.get_by_id(saved.id).await.unwrap();
    assert_eq!(stored, winners[0]);
}
