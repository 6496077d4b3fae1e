//! Command recognition for inbound message text.
//!
//! Two commands exist:
//!
//! ```text
//! !id <ham|gmrs|cb|club> <IDENTIFIER>   save an identity label
//! !qth                                  report grid (and distance/bearing)
//! ```
//!
//! Keywords and category tokens match case-insensitively. Anything else,
//! including abbreviations and trailing text after `!qth`, is unrecognized.

use regex::Regex;
use std::sync::OnceLock;

use crate::text::normalize_whitespace;
use crate::IdentityKind;

/// Usage text listing both command forms.
pub const USAGE: &str = "Commands: !id <ham|gmrs|cb|club> <id>; !qth";

fn identity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^!id\s+(ham|gmrs|cb|club)(?:\s+(.+))?$").expect("!id pattern compiles")
    })
}

fn qth_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^!qth$").expect("!qth pattern compiles"))
}

/// A classified inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `!id <kind> <raw>`; `raw` is empty when no identifier followed the kind.
    SetIdentity { kind: IdentityKind, raw: String },
    /// `!qth`
    QueryQth,
    /// Anything else.
    Unrecognized,
}

impl Command {
    /// Short name for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetIdentity { .. } => "set_identity",
            Command::QueryQth => "query_qth",
            Command::Unrecognized => "unrecognized",
        }
    }
}

/// Classify a message. The text is whitespace-normalized first.
pub fn parse_command(text: &str) -> Command {
    let text = normalize_whitespace(text);

    if let Some(caps) = identity_re().captures(&text) {
        let kind = match caps[1].parse::<IdentityKind>() {
            Ok(kind) => kind,
            Err(_) => return Command::Unrecognized,
        };
        let raw = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
        return Command::SetIdentity { kind, raw };
    }

    if qth_re().is_match(&text) {
        return Command::QueryQth;
    }

    Command::Unrecognized
}
