use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading configuration or collection files.
///
/// The engine itself never fails: every input it receives has already been
/// validated at the host boundary.
#[derive(Debug, Error)]
pub enum ShelfError {
    /// Reading or writing a file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A file was not valid JSON for its format.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A collection file parsed but holds an unusable entry.
    #[error("invalid collection {path}: {message}")]
    InvalidCollection {
        /// File that was read.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },
}

/// Result alias for file-backed operations.
pub type Result<T> = std::result::Result<T, ShelfError>;
