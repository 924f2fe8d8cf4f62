//! Storage layer for the pick tracker
//!
//! Picks are persisted as one serialized string per picker behind a small
//! key-value interface, so the pick logic can run against any backend:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: Basic CRUD operations
//!
//! [`MemoryStore`] backs tests and dry runs; [`PickDatabase`] is the
//! on-disk SQLite store.

pub mod models;
pub mod queries;
pub mod schema;


use std::collections::HashMap;

use crate::Result;

// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::PickDatabase;

/// Minimal string key-value backend.
pub trait KeyValueStore {
    /// Value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; absent keys are not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

impl KeyValueStore for PickDatabase {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get_value(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        Ok(self.set_value(key, value)?)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.remove_value(key)?;
        Ok(())
    }
}
