//! Error types for identity validation.

use thiserror::Error;

use crate::IdentityKind;

/// Why an identifier was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    /// Normalized identifier is shorter or longer than allowed
    #[error("identifier length {len} is outside {min}..={max}")]
    Length { len: usize, min: usize, max: usize },

    /// Identifier does not match the category's format
    #[error("identifier is not a valid {kind} identifier")]
    Format { kind: IdentityKind },

    /// Category token is not one of ham, gmrs, cb, club
    #[error("unknown identity category: {0}")]
    UnknownKind(String),
}
