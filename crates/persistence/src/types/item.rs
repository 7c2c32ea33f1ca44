//! The item record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ItemId, StorageKey};
use super::timestamp::{render_token, token_format};

/// A stored item.
///
/// JSON field names are camelCase (`isActive` for [`active`](Item::active)).
/// Every field is optional on input and takes its zero value when absent.
/// The storage key is never serialized.
///
/// # Examples
///
/// ```
/// use itemstore_persistence::types::Item;
///
/// let item = Item::new("Apple", 2, "a red apple");
/// let json = serde_json::to_value(&item).unwrap();
/// assert_eq!(json["name"], "Apple");
/// assert_eq!(json["isActive"], true);
/// assert!(json.get("storageKey").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    /// Public identifier. Nil until the item is first saved.
    pub id: ItemId,

    /// Backend primary key. Set by the store that holds the item.
    #[serde(skip)]
    pub storage_key: Option<StorageKey>,

    /// Display name.
    pub name: String,

    /// Numeric payload.
    pub value: i64,

    /// Free-form description.
    pub description: String,

    /// Whether the item is active.
    #[serde(rename = "isActive")]
    pub active: bool,

    /// When the item was first saved.
    #[serde(with = "token_format")]
    pub created_on: Option<DateTime<Utc>>,

    /// When the item was last written. Doubles as its version token.
    #[serde(with = "token_format")]
    pub updated_on: Option<DateTime<Utc>>,
}

impl Item {
    /// Creates an active, unsaved item.
    pub fn new(name: impl Into<String>, value: i64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            description: description.into(),
            active: true,
            ..Self::default()
        }
    }

    /// Returns the version token (`updatedOn` rendered), if the item was ever saved.
    pub fn version_token(&self) -> Option<String> {
        self.updated_on.as_ref().map(render_token)
    }

    /// Prepares a new item for its first write.
    ///
    /// Assigns an id when the item has none, keeps a supplied `createdOn`
    /// unless it lies in the future, and sets `updatedOn` to `now`.
    pub fn stamp_for_save(&mut self, now: DateTime<Utc>) {
        if self.id.is_nil() {
            self.id = ItemId::generate();
        }
        let created = match self.created_on {
            Some(supplied) if supplied <= now => supplied,
            _ => now,
        };
        self.created_on = Some(created);
        self.updated_on = Some(now);
        self.storage_key = None;
    }
}
