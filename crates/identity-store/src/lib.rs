//! Identity Store: per-sender radio identities persisted as one JSON file.
//!
//! # Guarantees
//!
//! 1. **Tolerant load**: a missing, unreadable or malformed file reads as an
//!    empty store; records that no longer sanitize are dropped
//! 2. **Atomic save**: writes go to a temp file in the same directory that is
//!    then renamed over the target, so readers never see a partial file
//! 3. **Last writer wins**: no locking or merging between invocations
//!
//! File layout:
//!
//! ```text
//! { "by_node": { "<sender id>": { "type": "ham", "id": "W1ABC" } } }
//! ```

mod book;
mod error;
mod file_store;
mod traits;

pub use book::{IdentityBook, BY_NODE_KEY};
pub use error::{StoreError, StoreResult};
pub use file_store::{JsonFileStore, DEFAULT_STORE_PATH};
pub use traits::{IdentityStore, MemoryStore};
