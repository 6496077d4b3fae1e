//! QTH responder: one reply per inbound mesh message.
//!
//! MeshMonitor runs the responder once per message, passing the message and
//! sender details through the environment. The responder answers exactly
//! once, as a single JSON line on stdout:
//!
//! ```text
//! {"response":"Max: DN70ma • 87.3 mi @ 142°"}
//! ```
//!
//! # Commands
//!
//! - `!id <ham|gmrs|cb|club> <IDENTIFIER>` saves the sender's identity label
//! - `!qth` replies with the sender's label and Maidenhead grid, plus distance
//!   and bearing to the station when the station position is known
//!
//! # Architecture
//!
//! ```text
//! env -> InvocationContext -> parse_command -> { sanitize -> store upsert/save
//!                                              | store lookup -> radio_geo }
//!                                           -> Reply -> {"response": ...}
//! ```
//!
//! Store failures never surface to the sender; the reply is always produced.

pub mod config;
pub mod context;
pub mod error;
pub mod reply;
pub mod responder;

pub use config::{ResponderConfig, DEFAULT_MAX_REPLY_LEN};
pub use context::InvocationContext;
pub use error::{ResponderError, ResponderResult};
pub use reply::{Reply, ReplyEnvelope};
pub use responder::respond;

/// Service name used in log lines.
pub const SERVICE_NAME: &str = "mm-radio-qth";
