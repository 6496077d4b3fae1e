//! Reply text and the JSON envelope MeshMonitor reads from stdout.

use radio_identity::{IdentityKind, IdentityRecord, USAGE};
use serde::{Deserialize, Serialize};

use crate::error::ResponderResult;

/// The single reply of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    text: String,
}

impl Reply {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn usage() -> Self {
        Self::new(USAGE)
    }

    pub fn missing_sender() -> Self {
        Self::new("Cannot save identity: sender node ID missing.")
    }

    pub fn invalid_identifier(kind: IdentityKind) -> Self {
        Self::new(format!("Invalid {kind} identifier."))
    }

    pub fn saved(record: &IdentityRecord) -> Self {
        Self::new(format!("Saved identity: {}", record.label()))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Reply text cut to at most `max_chars` characters.
    pub fn truncated(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => &self.text[..byte_idx],
            None => &self.text,
        }
    }

    pub fn envelope(&self, max_chars: usize) -> ReplyEnvelope {
        ReplyEnvelope {
            response: self.truncated(max_chars).to_string(),
        }
    }
}

/// Output record: `{"response": "<text>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    pub response: String,
}

impl ReplyEnvelope {
    /// Compact single-line JSON, without a trailing newline.
    pub fn to_json_line(&self) -> ResponderResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
