//! Identity categories and sanitized identity records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{sanitize, SanitizeError};

/// Category of a saved identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    /// Amateur radio callsign.
    Ham,
    /// GMRS callsign, optionally with a unit suffix.
    Gmrs,
    /// CB handle.
    Cb,
    /// Club or group name.
    Club,
}

impl IdentityKind {
    pub const ALL: [IdentityKind; 4] = [
        IdentityKind::Ham,
        IdentityKind::Gmrs,
        IdentityKind::Cb,
        IdentityKind::Club,
    ];

    /// Lower-case token used in commands and on disk.
    pub fn as_str(self) -> &'static str {
        match self {
            IdentityKind::Ham => "ham",
            IdentityKind::Gmrs => "gmrs",
            IdentityKind::Cb => "cb",
            IdentityKind::Club => "club",
        }
    }

    /// Upper-case prefix used in display labels.
    pub fn label_prefix(self) -> &'static str {
        match self {
            IdentityKind::Ham => "HAM",
            IdentityKind::Gmrs => "GMRS",
            IdentityKind::Cb => "CB",
            IdentityKind::Club => "CLUB",
        }
    }
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentityKind {
    type Err = SanitizeError;

    /// Case-insensitive parse of a category token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdentityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SanitizeError::UnknownKind(s.to_string()))
    }
}

/// On-disk shape of a record before it is validated.
#[derive(Debug, Clone, Deserialize)]
struct RawIdentityRecord {
    #[serde(rename = "type")]
    kind: IdentityKind,
    id: String,
}

/// A saved identity for one sender.
///
/// # Invariants
/// - `identifier` is always the output of [`sanitize`] for `kind`, including
///   when the record is deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIdentityRecord")]
pub struct IdentityRecord {
    #[serde(rename = "type")]
    kind: IdentityKind,
    #[serde(rename = "id")]
    identifier: String,
}

impl IdentityRecord {
    /// Sanitize `raw` for `kind` and build a record from the result.
    pub fn new(kind: IdentityKind, raw: &str) -> Result<Self, SanitizeError> {
        let identifier = sanitize(kind, raw)?;
        Ok(Self { kind, identifier })
    }

    pub fn kind(&self) -> IdentityKind {
        self.kind
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Display label, e.g. `HAM W1ABC`.
    pub fn label(&self) -> String {
        format!("{} {}", self.kind.label_prefix(), self.identifier)
    }
}

impl TryFrom<RawIdentityRecord> for IdentityRecord {
    type Error = SanitizeError;

    fn try_from(raw: RawIdentityRecord) -> Result<Self, Self::Error> {
        IdentityRecord::new(raw.kind, &raw.id)
    }
}

impl fmt::Display for IdentityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.label_prefix(), self.identifier)
    }
}
