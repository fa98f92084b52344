// error.rs — Error types for session state and token persistence.

use thiserror::Error;

/// Errors that can occur while persisting or restoring session state.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A token file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize persisted tokens.
    #[error("token serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
