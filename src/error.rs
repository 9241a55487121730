//! Error types for high-score persistence

/// Errors raised while reading or writing the high-score file.
///
/// These never reach gameplay code: the store logs them and carries on with
/// its in-memory list.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or unserialisable score document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for persistence operations
pub type Result<T> = std::result::Result<T, Error>;
