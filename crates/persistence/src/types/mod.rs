//! Core types for the persistence layer.
//!
//! - [`Item`] - The stored record and its JSON shape
//! - [`ItemId`], [`StorageKey`] - Public and backend-private identifiers
//! - [`timestamp`] - Millisecond timestamps and their version token rendering
//! - [`ItemDocument`] - The compact document layout written to document stores
//!
//! # Examples
//!
//! ```
//! use itemstore_persistence::types::Item;
//!
//! let item: Item = serde_json::from_str(r#"{"name":"Pear","value":4,"isActive":true}"#).unwrap();
//! assert!(item.id.is_nil());
//! assert!(item.active);
//! assert_eq!(item.description, "");
//! ```

mod document;
mod id;
mod item;
pub mod timestamp;

pub use document::ItemDocument;
pub use id::{ItemId, StorageKey};
pub use item::Item;
