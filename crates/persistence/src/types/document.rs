//! Compact document layout.
//!
//! Document stores keep items under short field names. The JSON shape of an
//! [`Item`] is for clients; [`ItemDocument`] is what lands on disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ItemId, StorageKey};
use super::item::Item;
use super::timestamp::token_format;

/// An item as written to a document store.
///
/// | Item field | Document key |
/// |------------|--------------|
/// | id | `id` |
/// | name | `nam` |
/// | value | `val` |
/// | description | `dsc` |
/// | active | `act` |
/// | created_on | `con` |
/// | updated_on | `uon` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDocument {
    pub id: ItemId,
    #[serde(rename = "nam", default)]
    pub name: String,
    #[serde(rename = "val", default)]
    pub value: i64,
    #[serde(rename = "dsc", default)]
    pub description: String,
    #[serde(rename = "act", default)]
    pub active: bool,
    #[serde(rename = "con", with = "token_format", default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(rename = "uon", with = "token_format", default)]
    pub updated_on: Option<DateTime<Utc>>,
}

impl ItemDocument {
    /// Converts back into an item held under `key`.
    pub fn into_item(self, key: StorageKey) -> Item {
        Item {
            id: self.id,
            storage_key: Some(key),
            name: self.name,
            value: self.value,
            description: self.description,
            active: self.active,
            created_on: self.created_on,
            updated_on: self.updated_on,
        }
    }
}

impl From<&Item> for ItemDocument {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            value: item.value,
            description: item.description.clone(),
            active: item.active,
            created_on: item.created_on,
            updated_on: item.updated_on,
        }
    }
}
