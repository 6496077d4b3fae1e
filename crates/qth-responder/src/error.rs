//! Error types for the responder.

use thiserror::Error;

/// Responder error type.
#[derive(Error, Debug)]
pub enum ResponderError {
    /// Configuration value could not be used
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (writing the reply)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reply envelope could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for responder operations.
pub type ResponderResult<T> = Result<T, ResponderError>;
