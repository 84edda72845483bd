//! Infrastructure layer: key-value persistence and configuration.

pub mod config;
pub mod error;
pub mod kv_store;
pub mod persistent_desk;

pub use config::{ConfigError, DeskConfig};
pub use error::PersistenceError;
pub use kv_store::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
pub use persistent_desk::PersistentDesk;
