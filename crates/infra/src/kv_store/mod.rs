//! Key-value storage for desk state.
//!
//! The desk persists its whole state as one JSON document under a fixed key.
//! Any store that can get and put a JSON value by key can back it, as long
//! as a single `put` replaces the value atomically.

pub mod file;
pub mod in_memory;

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::error::PersistenceError;

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;

/// Key-value store abstraction for desk state.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` if nothing was saved yet.
    fn get(&self, key: &str) -> Result<Option<JsonValue>, PersistenceError>;

    /// Replace the value stored under `key`.
    fn put(&self, key: &str, value: JsonValue) -> Result<(), PersistenceError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<JsonValue>, PersistenceError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: JsonValue) -> Result<(), PersistenceError> {
        (**self).put(key, value)
    }
}

/// Keys are used as file names, so only `[a-z0-9_]` is accepted.
pub(crate) fn validate_key(key: &str) -> Result<(), PersistenceError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(PersistenceError::InvalidKey(key.to_string()))
    }
}
