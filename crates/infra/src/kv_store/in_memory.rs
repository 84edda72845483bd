use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value as JsonValue;

use super::{KeyValueStore, validate_key};
use crate::error::PersistenceError;

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, JsonValue>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<JsonValue>, PersistenceError> {
        validate_key(key)?;
        let map = self.inner.read().map_err(|_| PersistenceError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn put(&self, key: &str, value: JsonValue) -> Result<(), PersistenceError> {
        validate_key(key)?;
        let mut map = self.inner.write().map_err(|_| PersistenceError::Poisoned)?;
        map.insert(key.to_string(), value);
        Ok(())
    }
}
