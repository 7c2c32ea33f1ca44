//! Request payloads.

use serde_json::{Value, json};

/// The item payload used by handler tests.
pub const ITEM_PAYLOAD: &str = include_str!("../fixtures/item-payload.json");

/// The item payload as JSON.
pub fn item_payload() -> Value {
    serde_json::from_str(ITEM_PAYLOAD).expect("item-payload.json is valid JSON")
}

/// A small item body with the given name and value.
pub fn item_body(name: &str, value: i64) -> Value {
    json!({ "name": name, "value": value })
}
