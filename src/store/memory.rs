//! Thread-safe in-memory resource store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::store::item::{Fields, Item};

/// Items plus the id counter, guarded together.
#[derive(Debug)]
struct Inner {
    items: HashMap<String, Item>,
    next_id: u64,
}

/// Process-local item store keyed by store-assigned identifiers.
///
/// Identifiers are decimal renderings of a counter starting at 1. They are
/// never reused, even after the item is deleted.
#[derive(Debug)]
pub struct ResourceStore {
    inner: Mutex<Inner>,
}

impl ResourceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    // Every operation leaves the map consistent before it can panic, so a
    // poisoned lock still guards valid data.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All current items in creation order.
    pub fn list(&self) -> Vec<Item> {
        let inner = self.lock();
        let mut items: Vec<Item> = inner.items.values().cloned().collect();
        // Minted ids are canonical decimals: shorter sorts first.
        items.sort_by(|a, b| a.id.len().cmp(&b.id.len()).then_with(|| a.id.cmp(&b.id)));
        items
    }

    /// Exact-match lookup.
    pub fn get(&self, id: &str) -> Option<Item> {
        self.lock().items.get(id).cloned()
    }

    /// Insert a new item under a freshly minted id.
    pub fn create(&self, fields: Fields) -> Item {
        let mut inner = self.lock();
        let id = inner.next_id.to_string();
        inner.next_id += 1;

        let item = Item::new(id.clone(), fields);
        inner.items.insert(id, item.clone());
        tracing::debug!(id = %item.id, "Item created");
        item
    }

    /// Replace all fields of an existing item. Returns `None` if absent.
    pub fn update(&self, id: &str, fields: Fields) -> Option<Item> {
        let mut inner = self.lock();
        let slot = inner.items.get_mut(id)?;
        *slot = Item::new(id, fields);
        tracing::debug!(id = %id, "Item replaced");
        Some(slot.clone())
    }

    /// Remove an item. Returns whether it existed.
    pub fn delete(&self, id: &str) -> bool {
        let removed = self.lock().items.remove(id).is_some();
        if removed {
            tracing::debug!(id = %id, "Item deleted");
        }
        removed
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// True when no items are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new()
    }
}
