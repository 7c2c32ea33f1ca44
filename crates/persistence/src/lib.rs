//! Item Store Persistence Layer
//!
//! This crate provides the storage layer for the item store service. Items are
//! kept in a document store behind the [`core::ItemStore`] trait, so the HTTP
//! layer never depends on a concrete database.
//!
//! # Features
//!
//! - **Multiple Backends**: in-memory, SQLite, MongoDB
//! - **Optimistic Concurrency**: updates carry the `updatedOn` token the client
//!   last saw and fail with [`StorageError::Outdated`] when the item has moved on
//! - **Classified Errors**: raw driver failures are translated into a small
//!   taxonomy (`NotFound`, `Outdated`, `Conflict`, `Unclassified`)
//!
//! # Backend Features
//!
//! Enable backends with feature flags in `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! itemstore-persistence = { version = "0.1", features = ["mongodb"] }
//! ```
//!
//! Available backend features:
//! - `sqlite` (default) - SQLite with in-memory and file modes
//! - `mongodb` - MongoDB document storage
//!
//! The in-memory backend is always available.
//!
//! # Architecture
//!
//! - [`types`] - The [`Item`](types::Item) record, identifiers and timestamps
//! - [`error`] - Error types and the backend failure classifier
//! - [`core`] - The [`ItemStore`](core::ItemStore) trait and update helpers
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```
//! use itemstore_persistence::backends::memory::MemoryBackend;
//! use itemstore_persistence::core::ItemStore;
//! use itemstore_persistence::types::Item;
//!
//! # async fn example() -> Result<(), itemstore_persistence::StorageError> {
//! let store = MemoryBackend::new();
//!
//! let saved = store.save(Item::new("Apple", 2, "a red apple")).await?;
//! assert!(saved.created_on.is_some());
//!
//! let token = saved.version_token().unwrap_or_default();
//! let mut changed = saved.clone();
//! changed.value = 3;
//! let updated = store.update(changed, &token).await?;
//! assert!(updated.updated_on > saved.updated_on);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;

pub use error::{BackendFailure, ErrorKind, StorageError, StorageResult};
