//! Item fixtures.

use itemstore_persistence::types::Item;

/// An active item with the given name.
pub fn sample_item(name: &str) -> Item {
    Item::new(name, name.len() as i64, format!("{} description", name))
}

/// A handful of distinct items.
pub fn sample_items() -> Vec<Item> {
    ["Apple", "Banana", "Cherry", "Damson"]
        .into_iter()
        .map(sample_item)
        .collect()
}
