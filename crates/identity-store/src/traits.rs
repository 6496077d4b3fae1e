//! Store capability seen by the responder.

use std::sync::{Mutex, MutexGuard};

use crate::IdentityBook;

/// Best-effort persistence for identity books.
///
/// Neither method fails: `load` returns the best state available and `save`
/// reports whether the book reached durable storage.
pub trait IdentityStore {
    /// Load the current book, or an empty one if nothing usable is stored.
    fn load(&self) -> IdentityBook;

    /// Persist `book`. Returns `false` when the write did not happen.
    fn save(&self, book: &IdentityBook) -> bool;
}

/// In-process store, used to exercise the responder without a file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    book: Mutex<IdentityBook>,
    reject_saves: bool,
}

impl MemoryStore {
    pub fn new(book: IdentityBook) -> Self {
        Self {
            book: Mutex::new(book),
            reject_saves: false,
        }
    }

    /// A store whose saves always fail, leaving the held book untouched.
    pub fn read_only(book: IdentityBook) -> Self {
        Self {
            book: Mutex::new(book),
            reject_saves: true,
        }
    }

    /// Copy of the currently held book.
    pub fn snapshot(&self) -> IdentityBook {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, IdentityBook> {
        self.book.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl IdentityStore for MemoryStore {
    fn load(&self) -> IdentityBook {
        self.lock().clone()
    }

    fn save(&self, book: &IdentityBook) -> bool {
        if self.reject_saves {
            return false;
        }
        *self.lock() = book.clone();
        true
    }
}
