//! In-memory view of the store file.

use radio_identity::IdentityRecord;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

use crate::{StoreError, StoreResult};

/// Top-level key holding the per-sender records.
pub const BY_NODE_KEY: &str = "by_node";

/// Per-sender identities plus any other top-level keys found in the file.
///
/// Unknown top-level keys are carried through a load/save cycle untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityBook {
    by_node: BTreeMap<String, IdentityRecord>,
    extra: Map<String, Value>,
}

impl IdentityBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, sender_id: &str) -> Option<&IdentityRecord> {
        self.by_node.get(sender_id)
    }

    /// Store `record` for `sender_id`, replacing any previous record.
    pub fn upsert(&mut self, sender_id: impl Into<String>, record: IdentityRecord) {
        self.by_node.insert(sender_id.into(), record);
    }

    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }

    /// Build a book from a parsed store document.
    ///
    /// The document must be an object; a missing `by_node` key is an empty
    /// book. Entries that fail to deserialize or re-sanitize are skipped.
    pub fn from_value(value: Value) -> StoreResult<Self> {
        let Value::Object(mut extra) = value else {
            return Err(StoreError::Shape("top-level value is not an object".into()));
        };

        let entries = match extra.remove(BY_NODE_KEY) {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(entries)) => entries,
            Some(_) => {
                return Err(StoreError::Shape(format!(
                    "\"{BY_NODE_KEY}\" is not an object"
                )))
            }
        };

        // Only records that pass sanitizing are kept; anything else on disk is
        // dropped here and disappears with the next save.
        let mut by_node = BTreeMap::new();
        for (sender_id, entry) in entries {
            match serde_json::from_value::<IdentityRecord>(entry) {
                Ok(record) => {
                    by_node.insert(sender_id, record);
                }
                Err(e) => {
                    debug!(sender_id = %sender_id, error = %e, "Skipping invalid identity record");
                }
            }
        }

        Ok(Self { by_node, extra })
    }

    /// Render the book as a store document.
    pub fn to_value(&self) -> StoreResult<Value> {
        let mut document = Map::new();
        document.insert(BY_NODE_KEY.to_string(), serde_json::to_value(&self.by_node)?);
        for (key, value) in &self.extra {
            document.insert(key.clone(), value.clone());
        }
        Ok(Value::Object(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_identity::IdentityKind;
    use serde_json::json;

    fn ham(call: &str) -> IdentityRecord {
        IdentityRecord::new(IdentityKind::Ham, call).unwrap()
    }

    #[test]
    fn get_on_empty_book_is_none() {
        let book = IdentityBook::new();
        assert!(book.get("!a1b2").is_none());
        assert!(book.is_empty());
    }

    #[test]
    fn upsert_replaces_previous_record() {
        let mut book = IdentityBook::new();
        book.upsert("!a1b2", ham("W1ABC"));
        book.upsert("!a1b2", IdentityRecord::new(IdentityKind::Cb, "Rubber Duck").unwrap());

        assert_eq!(book.len(), 1);
        assert_eq!(book.get("!a1b2").unwrap().label(), "CB Rubber Duck");
    }

    #[test]
    fn from_value_reads_records() {
        let book = IdentityBook::from_value(json!({
            "by_node": {
                "!a1b2": { "type": "ham", "id": "W1ABC" },
                "!c3d4": { "type": "gmrs", "id": "WRUV246-2" }
            }
        }))
        .unwrap();

        assert_eq!(book.len(), 2);
        assert_eq!(book.get("!a1b2"), Some(&ham("W1ABC")));
        assert_eq!(book.get("!c3d4").unwrap().label(), "GMRS WRUV246-2");
    }

    #[test]
    fn from_value_without_by_node_is_empty() {
        let book = IdentityBook::from_value(json!({})).unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn from_value_rejects_wrong_shapes() {
        assert!(matches!(
            IdentityBook::from_value(json!([1, 2, 3])),
            Err(StoreError::Shape(_))
        ));
        assert!(matches!(
            IdentityBook::from_value(json!({ "by_node": "nope" })),
            Err(StoreError::Shape(_))
        ));
    }

    #[test]
    fn from_value_skips_bad_entries() {
        let book = IdentityBook::from_value(json!({
            "by_node": {
                "good": { "type": "ham", "id": "W1ABC" },
                "bad_kind": { "type": "frs", "id": "ABC" },
                "bad_id": { "type": "ham", "id": "W 1" },
                "not_object": 42
            }
        }))
        .unwrap();

        assert_eq!(book.len(), 1);
        assert!(book.get("good").is_some());
    }

    #[test]
    fn unsanitizable_entries_are_not_written_back() {
        let mut book = IdentityBook::from_value(json!({
            "by_node": {
                "!old": { "type": "gmrs", "id": "not a callsign" },
                "!raw": { "type": "ham", "id": "w1abc" }
            }
        }))
        .unwrap();
        book.upsert("!a1b2", ham("K2XYZ"));

        let value = book.to_value().unwrap();
        assert!(value["by_node"].get("!old").is_none());
        assert_eq!(value["by_node"]["!raw"], json!({ "type": "ham", "id": "W1ABC" }));
        assert_eq!(value["by_node"]["!a1b2"]["id"], "K2XYZ");
    }

    #[test]
    fn unknown_top_level_keys_survive_round_trip() {
        let book = IdentityBook::from_value(json!({
            "by_node": {},
            "version": 2
        }))
        .unwrap();

        let value = book.to_value().unwrap();
        assert_eq!(value["version"], json!(2));
        assert_eq!(value["by_node"], json!({}));
    }

    #[test]
    fn to_value_uses_type_and_id_keys() {
        let mut book = IdentityBook::new();
        book.upsert("!a1b2", ham("w1abc"));

        assert_eq!(
            book.to_value().unwrap(),
            json!({ "by_node": { "!a1b2": { "type": "ham", "id": "W1ABC" } } })
        );
    }
}
