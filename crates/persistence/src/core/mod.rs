//! Core storage traits and abstractions.
//!
//! - [`ItemStore`] - CRUD operations plus the conditional update protocol
//! - [`versioned`] - Helpers for version token comparison and replacement
//!
//! # Conditional Update Protocol
//!
//! ```text
//! update(item, if_match)
//!     │
//!     ├── get_by_id(item.id) ──────────────► NotFound
//!     ├── token(current) != if_match ──────► Outdated
//!     ├── prepare_replacement(current, item)
//!     └── replace_versioned(replacement, previous updatedOn)
//!             └── modified != 1 ───────────► Unclassified
//! ```
//!
//! Backends only supply the final compare-and-swap step. The check and the
//! write are not atomic, but the swap is keyed on the previous `updatedOn`,
//! so a write that lost a race modifies nothing and is reported.

mod store;
pub mod versioned;

pub use store::ItemStore;
pub use versioned::{
    Replacement, check_token_match, ensure_single_modification, prepare_replacement,
};
