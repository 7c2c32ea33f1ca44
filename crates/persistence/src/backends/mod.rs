//! Database backend implementations.
//!
//! Each backend implements [`ItemStore`](crate::core::ItemStore). The
//! database-backed ones are gated behind a feature flag.
//!
//! # Available Backends
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | Memory | always | Process-local map, for tests and throwaway runs |
//! | SQLite | `sqlite` | Embedded database, items stored as JSON documents |
//! | MongoDB | `mongodb` | Document store, one document per item |
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "sqlite")]
//! use itemstore_persistence::backends::sqlite::SqliteBackend;
//!
//! # #[cfg(feature = "sqlite")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create an in-memory SQLite backend
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! // Or use a file-based database
//! let backend = SqliteBackend::open("./data/items.db")?;
//! # Ok(())
//! # }
//! ```

pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "mongodb")]
pub mod mongodb;
