//! Configuration for the responder.

use identity_store::DEFAULT_STORE_PATH;
use std::path::PathBuf;
use tracing::warn;

use crate::error::{ResponderError, ResponderResult};

/// Reply length cap used when none is configured.
pub const DEFAULT_MAX_REPLY_LEN: usize = 200;

/// Responder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponderConfig {
    /// Path to the identity store file
    pub store_path: PathBuf,

    /// Maximum reply length in characters
    pub max_reply_len: usize,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            max_reply_len: DEFAULT_MAX_REPLY_LEN,
        }
    }
}

impl ResponderConfig {
    /// Build a config from optional caller-supplied values.
    ///
    /// A missing or blank store path uses [`DEFAULT_STORE_PATH`]. A missing
    /// length uses [`DEFAULT_MAX_REPLY_LEN`]; an unusable one does too, after
    /// a warning.
    pub fn new(store_path: Option<PathBuf>, max_reply_len: Option<&str>) -> Self {
        let store_path = store_path
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        let max_reply_len = match parse_max_reply_len(max_reply_len) {
            Ok(len) => len.unwrap_or(DEFAULT_MAX_REPLY_LEN),
            Err(e) => {
                warn!(error = %e, default = DEFAULT_MAX_REPLY_LEN, "Using default reply length");
                DEFAULT_MAX_REPLY_LEN
            }
        };

        Self {
            store_path,
            max_reply_len,
        }
    }
}

/// Parse a reply length setting. Blank input means "not set".
pub fn parse_max_reply_len(raw: Option<&str>) -> ResponderResult<Option<usize>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    match raw.parse::<usize>() {
        Ok(0) => Err(ResponderError::Config(
            "max reply length must be at least 1".to_string(),
        )),
        Ok(len) => Ok(Some(len)),
        Err(e) => Err(ResponderError::Config(format!(
            "invalid max reply length {raw:?}: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResponderConfig::default();
        assert_eq!(config.store_path, PathBuf::from("/data/scripts/mm_radio_id_db.json"));
        assert_eq!(config.max_reply_len, 200);
    }

    #[test]
    fn test_config_new_overrides() {
        let config = ResponderConfig::new(Some(PathBuf::from("/tmp/ids.json")), Some("120"));
        assert_eq!(config.store_path, PathBuf::from("/tmp/ids.json"));
        assert_eq!(config.max_reply_len, 120);
    }

    #[test]
    fn test_config_new_falls_back() {
        assert_eq!(ResponderConfig::new(None, None), ResponderConfig::default());
        assert_eq!(
            ResponderConfig::new(Some(PathBuf::new()), Some("  ")),
            ResponderConfig::default()
        );
        assert_eq!(ResponderConfig::new(None, Some("lots")).max_reply_len, 200);
        assert_eq!(ResponderConfig::new(None, Some("0")).max_reply_len, 200);
        assert_eq!(ResponderConfig::new(None, Some("-5")).max_reply_len, 200);
    }

    #[test]
    fn test_parse_max_reply_len() {
        assert_eq!(parse_max_reply_len(None).unwrap(), None);
        assert_eq!(parse_max_reply_len(Some(" 80 ")).unwrap(), Some(80));
        assert!(matches!(
            parse_max_reply_len(Some("abc")),
            Err(ResponderError::Config(_))
        ));
        assert!(matches!(
            parse_max_reply_len(Some("0")),
            Err(ResponderError::Config(_))
        ));
    }
}
