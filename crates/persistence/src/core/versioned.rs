//! Version token helpers for conditional updates.
//!
//! The version token of an item is its `updatedOn` timestamp rendered by
//! [`render_token`](crate::types::timestamp::render_token). Clients echo it
//! back in `If-Match`; these helpers decide whether the echo is current and
//! build the item that replaces the stored one.

use chrono::{DateTime, Utc};

use crate::error::{StorageError, StorageResult};
use crate::types::Item;
use crate::types::timestamp::next_timestamp;

/// The item to write and the `updatedOn` it must replace.
#[derive(Debug, Clone)]
pub struct Replacement {
    /// The new state of the item.
    pub item: Item,
    /// The stored `updatedOn` the write is conditional on.
    pub previous: DateTime<Utc>,
}

/// Checks that `if_match` is the current token of `current`.
///
/// The comparison is exact string equality against the rendered `updatedOn`,
/// after stripping surrounding quotes and a weak validator prefix. A different
/// rendering of the same instant does not match.
pub fn check_token_match(current: &Item, if_match: &str) -> StorageResult<()> {
    let actual = current.version_token().unwrap_or_default();
    let expected = normalize_token(if_match);

    if !actual.is_empty() && expected == actual {
        Ok(())
    } else {
        Err(StorageError::Outdated {
            id: current.id,
            expected: expected.to_string(),
            actual,
        })
    }
}

/// Builds the replacement for `current` from the client's `requested` item.
///
/// Client fields (name, value, description, active) are taken from
/// `requested`. Id, storage key and `createdOn` come from `current`, and
/// `updatedOn` advances past the stored value.
pub fn prepare_replacement(current: &Item, requested: Item) -> StorageResult<Replacement> {
    let previous = current.updated_on.ok_or_else(|| {
        StorageError::unclassified(format!("stored item {} has no updatedOn", current.id))
    })?;

    let item = Item {
        id: current.id,
        storage_key: current.storage_key.clone(),
        created_on: current.created_on,
        updated_on: Some(next_timestamp(Some(previous))),
        ..requested
    };

    Ok(Replacement { item, previous })
}

/// Requires a conditional write to have modified exactly one item.
pub fn ensure_single_modification(modified: u64) -> StorageResult<()> {
    if modified == 1 {
        Ok(())
    } else {
        Err(StorageError::unclassified(
            "failed to update, updated count != 1",
        ))
    }
}

/// Strips a weak validator prefix and surrounding quotes.
///
/// `W/"2024-01-15T10:30:00.000Z"`, `"2024-01-15T10:30:00.000Z"` and the bare
/// token all normalize to the bare token.
pub fn normalize_token(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches("W/")
        .trim_start_matches('"')
        .trim_end_matches('"')
}
