//! Integer-keyed name table backing the gRPC service.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Thread-safe `id -> name` table.
#[derive(Debug, Default)]
pub struct NameTable {
    entries: Mutex<HashMap<i32, String>>,
}

impl NameTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name stored under `id`, if any.
    pub fn get(&self, id: i32) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Insert or overwrite the name stored under `id`.
    pub fn set(&self, id: i32, name: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, name.into());
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True when the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
