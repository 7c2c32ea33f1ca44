//! MongoDB backend implementation.
//!
//! One document per item in a single collection. Documents use the compact
//! field names of [`ItemDocument`](crate::types::ItemDocument) plus the
//! MongoDB `_id`, which serves as the storage key. Timestamps are stored as
//! BSON dates.
//!
//! # Example
//!
//! ```no_run
//! use itemstore_persistence::backends::mongodb::{MongoBackend, MongoConfig};
//!
//! # async fn example() -> Result<(), itemstore_persistence::StorageError> {
//! let backend = MongoBackend::connect(MongoConfig::default()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Conditional updates are a `replace_one` filtered on `_id` and the previous
//! `uon`; the modified count decides the outcome.

mod backend;
mod document;
mod storage;

pub use backend::{MongoBackend, MongoConfig};
