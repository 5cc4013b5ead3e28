use audiencelab_core::CoreError;
use thiserror::Error;

/// Errors returned by the audience store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The submitted fields failed validation; nothing was written.
    #[error("invalid audience: {0}")]
    Validation(#[from] CoreError),

    #[error("audience with ID {0} not found")]
    NotFound(String),

    #[error("could not read '{key}' from storage: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The storage medium rejected the write (quota, permissions, disk full).
    #[error("could not save '{key}' to storage: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize audiences: {0}")]
    Serialize(#[from] serde_json::Error),
}
