//! Error types for the identity store.

use std::path::PathBuf;
use thiserror::Error;

/// Identity store error type.
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO error reading or writing the store file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Store file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON parsed but does not have the expected layout
    #[error("Unexpected store layout: {0}")]
    Shape(String),

    /// Store path has no parent directory or file name
    #[error("Invalid store path: {}", .0.display())]
    InvalidPath(PathBuf),
}

/// Result type for identity store operations.
pub type StoreResult<T> = Result<T, StoreError>;
