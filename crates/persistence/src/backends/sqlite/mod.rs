//! SQLite backend implementation.
//!
//! Items are stored as JSON documents (the compact
//! [`ItemDocument`](crate::types::ItemDocument) layout) in a single table.
//! Both in-memory databases (for tests) and file-based databases are
//! supported.
//!
//! # Example
//!
//! ```no_run
//! use itemstore_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create an in-memory database
//! let backend = SqliteBackend::in_memory()?;
//!
//! // Initialize the schema
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE items (
//!     storage_key INTEGER PRIMARY KEY AUTOINCREMENT,
//!     id TEXT NOT NULL UNIQUE,
//!     data BLOB NOT NULL,        -- ItemDocument JSON
//!     created_on TEXT NOT NULL,  -- version token format
//!     updated_on TEXT NOT NULL
//! );
//! ```
//!
//! Conditional updates are a single `UPDATE ... WHERE storage_key = ? AND
//! updated_on = ?`, whose affected row count is the modified count.

mod backend;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use schema::SCHEMA_VERSION;
