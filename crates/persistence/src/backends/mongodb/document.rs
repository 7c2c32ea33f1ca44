//! BSON layout of a stored item.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};
use crate::types::{Item, ItemId, StorageKey};

/// An item as stored in MongoDB.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MongoItemDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    pub id: String,
    #[serde(rename = "nam", default)]
    pub name: String,
    #[serde(rename = "val", default)]
    pub value: i64,
    #[serde(rename = "dsc", default)]
    pub description: String,
    #[serde(rename = "act", default)]
    pub active: bool,
    #[serde(rename = "con")]
    pub created_on: mongodb::bson::DateTime,
    #[serde(rename = "uon")]
    pub updated_on: mongodb::bson::DateTime,
}

pub(crate) fn to_bson_datetime(ts: DateTime<Utc>) -> mongodb::bson::DateTime {
    mongodb::bson::DateTime::from_millis(ts.timestamp_millis())
}

fn from_bson_datetime(ts: mongodb::bson::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ts.timestamp_millis())
}

/// Parses a storage key issued by this backend.
pub(crate) fn object_id_of(item: &Item) -> StorageResult<ObjectId> {
    item.storage_key
        .as_ref()
        .and_then(|key| ObjectId::parse_str(key.as_str()).ok())
        .ok_or_else(|| {
            StorageError::unclassified(format!("item {} has no mongodb storage key", item.id))
        })
}

impl MongoItemDocument {
    /// Builds the document for a saved item. `object_id` is left unset on insert.
    pub fn from_item(item: &Item, object_id: Option<ObjectId>) -> StorageResult<Self> {
        let (Some(created_on), Some(updated_on)) = (item.created_on, item.updated_on) else {
            return Err(StorageError::unclassified(format!(
                "item {} has not been stamped",
                item.id
            )));
        };

        Ok(Self {
            object_id,
            id: item.id.to_string(),
            name: item.name.clone(),
            value: item.value,
            description: item.description.clone(),
            active: item.active,
            created_on: to_bson_datetime(created_on),
            updated_on: to_bson_datetime(updated_on),
        })
    }

    /// Converts back into an item keyed by the document's `_id`.
    pub fn into_item(self) -> StorageResult<Item> {
        let id: ItemId = self.id.parse().map_err(StorageError::unclassified_with)?;
        Ok(Item {
            id,
            storage_key: self.object_id.map(|oid| StorageKey::new(oid.to_hex())),
            name: self.name,
            value: self.value,
            description: self.description,
            active: self.active,
            created_on: from_bson_datetime(self.created_on),
            updated_on: from_bson_datetime(self.updated_on),
        })
    }
}
