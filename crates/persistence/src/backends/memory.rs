//! In-memory backend.
//!
//! Items live in a map guarded by a read-write lock. Storage keys come from a
//! counter, so they are unique for the life of the backend. Nothing survives
//! a restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::core::ItemStore;
use crate::error::{BackendFailure, StorageError, StorageResult};
use crate::types::timestamp::now_millis;
use crate::types::{Item, ItemId, StorageKey};

/// Process-local item store.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: RwLock<HashMap<ItemId, Item>>,
    next_key: AtomicU64,
}

impl MemoryBackend {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    fn allocate_key(&self) -> StorageKey {
        let key = self.next_key.fetch_add(1, Ordering::Relaxed) + 1;
        StorageKey::new(key.to_string())
    }
}

#[async_trait]
impl ItemStore for MemoryBackend {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn save(&self, mut item: Item) -> StorageResult<Item> {
        item.stamp_for_save(now_millis());

        let mut items = self.items.write();
        if items.contains_key(&item.id) {
            return Err(StorageError::classify(BackendFailure::DuplicateKey, item.id));
        }
        item.storage_key = Some(self.allocate_key());
        items.insert(item.id, item.clone());

        debug!(id = %item.id, "Item saved");
        Ok(item)
    }

    async fn get_by_id(&self, id: ItemId) -> StorageResult<Item> {
        self.items
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::classify(BackendFailure::NoMatchingDocument, id))
    }

    async fn get_all(&self) -> StorageResult<Vec<Item>> {
        let mut all: Vec<Item> = self.items.read().values().cloned().collect();
        all.sort_by(|a, b| a.created_on.cmp(&b.created_on).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn delete_by_id(&self, id: ItemId) -> StorageResult<()> {
        match self.items.write().remove(&id) {
            Some(_) => {
                debug!(id = %id, "Item deleted");
                Ok(())
            }
            None => Err(StorageError::classify(
                BackendFailure::NoMatchingDocument,
                id,
            )),
        }
    }

    async fn replace_versioned(
        &self,
        replacement: &Item,
        previous: DateTime<Utc>,
    ) -> StorageResult<u64> {
        let mut items = self.items.write();
        match items.get_mut(&replacement.id) {
            Some(stored)
                if stored.updated_on == Some(previous)
                    && stored.storage_key == replacement.storage_key =>
            {
                *stored = replacement.clone();
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_assigns_sequential_keys() {
        let store = MemoryBackend::new();
        let a = store.save(Item::new("a", 1, "")).await.unwrap();
        let b = store.save(Item::new("b", 2, "")).await.unwrap();
        assert_eq!(a.storage_key, Some(StorageKey::new("1")));
        assert_eq!(b.storage_key, Some(StorageKey::new("2")));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_replace_versioned_requires_previous() {
        let store = MemoryBackend::new();
        let saved = store.save(Item::new("a", 1, "")).await.unwrap();

        let mut replacement = saved.clone();
        replacement.name = "b".to_string();
        let stale = saved.updated_on.unwrap() - chrono::TimeDelta::seconds(1);

        assert_eq!(store.replace_versioned(&replacement, stale).await.unwrap(), 0);
        assert_eq!(
            store
                .replace_versioned(&replacement, saved.updated_on.unwrap())
                .await
                .unwrap(),
            1
        );
        assert_eq!(store.get_by_id(saved.id).await.unwrap().name, "b");
    }

    #[tokio::test]
    async fn test_replace_versioned_on_missing_item() {
        let store = MemoryBackend::new();
        let ghost = Item {
            id: ItemId::generate(),
            ..Item::default()
        };
        assert_eq!(
            store.replace_versioned(&ghost, now_millis()).await.unwrap(),
            0
        );
    }
}
