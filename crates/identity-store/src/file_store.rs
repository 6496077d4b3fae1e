//! JSON file backend with atomic replace-on-save.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

use crate::{IdentityBook, IdentityStore, StoreError, StoreResult};

/// Store location used when none is configured.
pub const DEFAULT_STORE_PATH: &str = "/data/scripts/mm_radio_id_db.json";

/// Identity store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the store file.
    pub fn try_load(&self) -> StoreResult<IdentityBook> {
        let content = fs::read_to_string(&self.path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        IdentityBook::from_value(value)
    }

    /// Serialize `book` and atomically replace the store file.
    pub fn try_save(&self, book: &IdentityBook) -> StoreResult<()> {
        let mut content = serde_json::to_string_pretty(&book.to_value()?)?;
        content.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        atomic_write_text(&self.path, &content)
    }
}

impl IdentityStore for JsonFileStore {
    fn load(&self) -> IdentityBook {
        match self.try_load() {
            Ok(book) => {
                debug!(path = %self.path.display(), records = book.len(), "Identity store loaded");
                book
            }
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No identity store yet, starting empty");
                IdentityBook::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable identity store, starting empty");
                IdentityBook::new()
            }
        }
    }

    fn save(&self, book: &IdentityBook) -> bool {
        match self.try_save(book) {
            Ok(()) => {
                debug!(path = %self.path.display(), records = book.len(), "Identity store saved");
                true
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to save identity store");
                false
            }
        }
    }
}

/// Write `content` next to `path` and rename it into place.
///
/// The temp name carries the pid and a timestamp so concurrent invocations
/// never share a temp file. Existing file permissions are kept on unix.
fn atomic_write_text(path: &Path, content: &str) -> StoreResult<()> {
    let invalid_path = || StoreError::InvalidPath(path.to_path_buf());
    let dir = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => return Err(invalid_path()),
    };
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(invalid_path)?;

    let tmp_name = format!(
        ".{}.{}.{}.tmp",
        file_name,
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    );
    let tmp_path = dir.join(tmp_name);

    #[cfg(unix)]
    let existing_mode = match fs::metadata(path) {
        Ok(metadata) => {
            use std::os::unix::fs::PermissionsExt;
            Some(metadata.permissions().mode())
        }
        Err(_) => None,
    };

    let write_result = (|| -> Result<(), io::Error> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;

        #[cfg(unix)]
        if let Some(mode) = existing_mode {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(mode))?;
        }

        fs::rename(&tmp_path, path)?;

        if let Ok(parent_dir) = fs::File::open(dir) {
            let _ = parent_dir.sync_all();
        }

        Ok(())
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }

    Ok(())
}
