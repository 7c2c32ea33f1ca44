//! ItemStore implementation for MongoDB.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::doc;
use tracing::debug;

use crate::core::ItemStore;
use crate::error::{BackendFailure, StorageError, StorageResult};
use crate::types::timestamp::now_millis;
use crate::types::{Item, ItemId, StorageKey};

use super::MongoBackend;
use super::document::{MongoItemDocument, object_id_of, to_bson_datetime};

fn classify(err: mongodb::error::Error, id: ItemId) -> StorageError {
    StorageError::classify(BackendFailure::from(err), id)
}

#[async_trait]
impl ItemStore for MongoBackend {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn save(&self, mut item: Item) -> StorageResult<Item> {
        item.stamp_for_save(now_millis());
        let document = MongoItemDocument::from_item(&item, None)?;

        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(|e| classify(e, item.id))?;

        let object_id = result.inserted_id.as_object_id().ok_or_else(|| {
            StorageError::unclassified(format!(
                "insert of item {} returned a non-ObjectId key",
                item.id
            ))
        })?;
        item.storage_key = Some(StorageKey::new(object_id.to_hex()));

        debug!(id = %item.id, "Item saved");
        Ok(item)
    }

    async fn get_by_id(&self, id: ItemId) -> StorageResult<Item> {
        let found = self
            .collection
            .find_one(doc! { "id": id.to_string() })
            .await
            .map_err(|e| classify(e, id))?;

        match found {
            Some(document) => document.into_item(),
            None => Err(StorageError::classify(
                BackendFailure::NoMatchingDocument,
                id,
            )),
        }
    }

    async fn get_all(&self) -> StorageResult<Vec<Item>> {
        let mut cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "con": 1, "id": 1 })
            .await
            .map_err(|e| classify(e, ItemId::nil()))?;

        let mut items = Vec::new();
        while cursor
            .advance()
            .await
            .map_err(|e| classify(e, ItemId::nil()))?
        {
            let document = cursor
                .deserialize_current()
                .map_err(|e| classify(e, ItemId::nil()))?;
            items.push(document.into_item()?);
        }

        Ok(items)
    }

    async fn delete_by_id(&self, id: ItemId) -> StorageResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "id": id.to_string() })
            .await
            .map_err(|e| classify(e, id))?;

        if result.deleted_count == 0 {
            return Err(StorageError::classify(
                BackendFailure::NoMatchingDocument,
                id,
            ));
        }

        debug!(id = %id, "Item deleted");
        Ok(())
    }

    async fn replace_versioned(
        &self,
        replacement: &Item,
        previous: DateTime<Utc>,
    ) -> StorageResult<u64> {
        let object_id = object_id_of(replacement)?;
        let document = MongoItemDocument::from_item(replacement, Some(object_id))?;

        let result = self
            .collection
            .replace_one(
                doc! { "_id": object_id, "uon": to_bson_datetime(previous) },
                &document,
            )
            .await
            .map_err(|e| classify(e, replacement.id))?;

        Ok(result.modified_count)
    }
}
