use thiserror::Error;

use cambio_core::DomainError;

/// Failure while loading or saving desk state.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize stored value: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Internal lock poisoning.
    #[error("storage lock poisoned")]
    Poisoned,

    #[error(transparent)]
    Domain(#[from] DomainError),
}
