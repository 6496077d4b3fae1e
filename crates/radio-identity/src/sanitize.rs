//! Identifier validation and normalization per identity category.

use regex::Regex;
use std::sync::OnceLock;

use crate::text::normalize_whitespace;
use crate::{IdentityKind, SanitizeError};

pub const MIN_IDENTIFIER_LEN: usize = 2;
pub const MAX_IDENTIFIER_LEN: usize = 24;

fn ham_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9/]{3,24}$").expect("ham pattern compiles"))
}

fn gmrs_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Z0-9]{4,10}(-[A-Z0-9]{1,4})?$").expect("gmrs pattern compiles")
    })
}

fn handle_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9 _-]{2,24}$").expect("handle pattern compiles"))
}

/// Validate `raw` as an identifier of `kind` and return its canonical form.
///
/// Whitespace runs collapse to single spaces and the ends are trimmed before
/// any rule applies. The result is stable: sanitizing it again returns the
/// same string.
pub fn sanitize(kind: IdentityKind, raw: &str) -> Result<String, SanitizeError> {
    let text = normalize_whitespace(raw);
    let len = text.chars().count();
    if !(MIN_IDENTIFIER_LEN..=MAX_IDENTIFIER_LEN).contains(&len) {
        return Err(SanitizeError::Length {
            len,
            min: MIN_IDENTIFIER_LEN,
            max: MAX_IDENTIFIER_LEN,
        });
    }

    let format_error = || SanitizeError::Format { kind };

    match kind {
        IdentityKind::Ham => {
            if text.contains(' ') || !ham_re().is_match(&text) {
                return Err(format_error());
            }
            Ok(text.to_uppercase())
        }
        IdentityKind::Gmrs => {
            let callsign = text.to_uppercase().replace(' ', "");
            if !gmrs_re().is_match(&callsign) {
                return Err(format_error());
            }
            Ok(callsign)
        }
        IdentityKind::Cb => {
            if !handle_re().is_match(&text) {
                return Err(format_error());
            }
            Ok(text)
        }
        IdentityKind::Club => {
            if !handle_re().is_match(&text) {
                return Err(format_error());
            }
            Ok(text.to_uppercase())
        }
    }
}
