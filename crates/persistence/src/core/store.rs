//! The item store trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::versioned::{self, Replacement};
use crate::error::StorageResult;
use crate::types::{Item, ItemId};

/// Storage abstraction for items.
///
/// Implementations report failures through the [`StorageError`](crate::StorageError)
/// taxonomy and never expose driver errors directly.
///
/// # Example
///
/// ```
/// use itemstore_persistence::core::ItemStore;
/// use itemstore_persistence::types::Item;
/// use itemstore_persistence::StorageError;
///
/// async fn rename<S: ItemStore>(store: &S, item: &Item, name: &str) -> Result<Item, StorageError> {
///     let token = item.version_token().unwrap_or_default();
///     let mut changed = item.clone();
///     changed.name = name.to_string();
///     store.update(changed, &token).await
/// }
/// ```
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Inserts a new item.
    ///
    /// Assigns an id when the item has none and stamps `createdOn` and
    /// `updatedOn` (see [`Item::stamp_for_save`]). Returns the item as stored.
    ///
    /// # Errors
    ///
    /// * `StorageError::Conflict` - If an item with the same id exists
    async fn save(&self, item: Item) -> StorageResult<Item>;

    /// Fetches one item.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound` - If no item has this id
    async fn get_by_id(&self, id: ItemId) -> StorageResult<Item>;

    /// Fetches every item. An empty store yields an empty list.
    async fn get_all(&self) -> StorageResult<Vec<Item>>;

    /// Removes one item.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound` - If no item has this id
    async fn delete_by_id(&self, id: ItemId) -> StorageResult<()>;

    /// Writes `replacement` over the stored item only if its `updatedOn` is
    /// still `previous`.
    ///
    /// Returns the number of items modified, which is 0 when the stored item
    /// moved on or vanished since it was read. Called by [`update`](Self::update);
    /// callers outside a backend should not need it.
    async fn replace_versioned(
        &self,
        replacement: &Item,
        previous: DateTime<Utc>,
    ) -> StorageResult<u64>;

    /// Replaces an item if the caller's version token is current.
    ///
    /// `if_match` must equal the stored item's `updatedOn` token. The stored
    /// `createdOn` and storage key are kept and `updatedOn` advances.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound` - If no item has this id
    /// * `StorageError::Outdated` - If `if_match` is not the current token
    /// * `StorageError::Unclassified` - If the write modified no item
    async fn update(&self, item: Item, if_match: &str) -> StorageResult<Item> {
        let id = item.id;
        let current = self.get_by_id(id).await?;
        versioned::check_token_match(&current, if_match)?;

        let Replacement { item, previous } = versioned::prepare_replacement(&current, item)?;
        let modified = self.replace_versioned(&item, previous).await?;
        versioned::ensure_single_modification(modified)?;

        debug!(id = %id, backend = self.backend_name(), "Item updated");
        Ok(item)
    }
}

#[async_trait]
impl<S: ItemStore + ?Sized> ItemStore for Arc<S> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    async fn save(&self, item: Item) -> StorageResult<Item> {
        (**self).save(item).await
    }

    async fn get_by_id(&self, id: ItemId) -> StorageResult<Item> {
        (**self).get_by_id(id).await
    }

    async fn get_all(&self) -> StorageResult<Vec<Item>> {
        (**self).get_all().await
    }

    async fn delete_by_id(&self, id: ItemId) -> StorageResult<()> {
        (**self).delete_by_id(id).await
    }

    async fn replace_versioned(
        &self,
        replacement: &Item,
        previous: DateTime<Utc>,
    ) -> StorageResult<u64> {
        (**self).replace_versioned(replacement, previous).await
    }

    async fn update(&self, item: Item, if_match: &str) -> StorageResult<Item> {
        (**self).update(item, if_match).await
    }
}
