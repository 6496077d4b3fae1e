//! Radio identities for the QTH responder.
//!
//! A sender can register one identity label per node: an amateur callsign,
//! a GMRS callsign (optionally with a unit suffix), a CB handle, or a club
//! name. Identifiers only exist in sanitized form; [`IdentityRecord`] cannot
//! be built from text that fails [`sanitize`].

pub mod command;
mod error;
mod record;
mod sanitize;
pub mod text;

pub use command::{parse_command, Command, USAGE};
pub use error::SanitizeError;
pub use record::{IdentityKind, IdentityRecord};
pub use sanitize::{sanitize, MAX_IDENTIFIER_LEN, MIN_IDENTIFIER_LEN};
