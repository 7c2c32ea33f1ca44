//! Response header generation.

use http::HeaderValue;
use itemstore_persistence::types::Item;

/// Builds the `Etag` value for an item: its rendered `updatedOn` token.
///
/// Returns `None` for an item that has never been saved.
pub fn etag_for(item: &Item) -> Option<HeaderValue> {
    item.version_token()
        .and_then(|token| HeaderValue::from_str(&token).ok())
}
