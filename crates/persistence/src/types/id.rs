//! Item identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The public identifier of an item.
///
/// Serialized as a hyphenated UUID string. The nil UUID means "not yet
/// assigned"; the store replaces it on save.
///
/// # Examples
///
/// ```
/// use itemstore_persistence::types::ItemId;
///
/// let id: ItemId = "0b6f1a3e-8d2c-4e63-9a51-3c1d0e7f9b24".parse().unwrap();
/// assert!(!id.is_nil());
/// assert_eq!(id.to_string(), "0b6f1a3e-8d2c-4e63-9a51-3c1d0e7f9b24");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Wraps an existing UUID.
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generates a fresh random (v4) id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The unassigned id.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns `true` if the id has not been assigned.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for ItemId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// The backend's own primary key for an item.
///
/// Opaque outside the backend that issued it: an SQLite row id, a MongoDB
/// ObjectId in hex, or a counter value in the in-memory store. It is never
/// part of the item's JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Creates a storage key from its string form.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
