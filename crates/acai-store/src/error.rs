//! Store error types.

use thiserror::Error;

/// Errors that can occur against the backing store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Row not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend itself failed.
    #[error("Store backend error: {0}")]
    Backend(String),

    /// Row could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}
