//! Knowledge base: read-only documentation for entity names.
//!
//! The resource is a JSON array of flat `name → documentation` objects.
//! Records stay separate and ordered: lookups scan them in sequence and the
//! first hit wins, and completion lists every key in the same order.

pub mod error;

use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use self::error::{KbError, KbResult};

/// Record set compiled into the binary, used when no path is configured.
const BUNDLED_RECORDS: &str = include_str!("../../assets/records.json");

/// One record: entity name → documentation, in file order.
pub type Record = IndexMap<String, String>;

/// Ordered sequence of documentation records.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    records: Vec<Record>,
}

impl KnowledgeBase {
    /// Parse a JSON array of objects whose values are all strings.
    pub fn from_json(json: &str) -> KbResult<Self> {
        let raw: Vec<IndexMap<String, Value>> = serde_json::from_str(json)?;
        let mut records = Vec::with_capacity(raw.len());
        for (index, object) in raw.into_iter().enumerate() {
            let mut record = Record::with_capacity(object.len());
            for (key, value) in object {
                match value {
                    Value::String(doc) => {
                        record.insert(key, doc);
                    }
                    _ => return Err(KbError::InvalidRecord { index, key }),
                }
            }
            records.push(record);
        }
        Ok(Self { records })
    }

    /// Load a knowledge base from a JSON file.
    pub fn load(path: &Path) -> KbResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| KbError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The record set shipped with the binary.
    pub fn bundled() -> Self {
        // Checked by `bundled_records_parse` below.
        Self::from_json(BUNDLED_RECORDS).unwrap_or_default()
    }

    /// Documentation for `name` from the first record that has a non-empty entry.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.records
            .iter()
            .filter_map(|record| record.get(name))
            .find(|doc| !doc.is_empty())
            .map(String::as_str)
    }

    /// Every `(name, documentation)` pair, record by record, duplicates included.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.records
            .iter()
            .flat_map(|record| record.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Total number of entries across all records.
    pub fn len(&self) -> usize {
        self.records.iter().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb(json: &str) -> KnowledgeBase {
        KnowledgeBase::from_json(json).unwrap()
    }

    #[test]
    fn bundled_records_parse() {
        let parsed = KnowledgeBase::from_json(BUNDLED_RECORDS);
        assert!(parsed.is_ok(), "bundled records invalid: {parsed:?}");
        assert!(!KnowledgeBase::bundled().is_empty());
    }

    #[test]
    fn lookup_first_record_wins() {
        let kb = kb(r#"[{"ns:Foo": "first"}, {"ns:Foo": "second", "ns:Bar": "bar"}]"#);
        assert_eq!(kb.lookup("ns:Foo"), Some("first"));
        assert_eq!(kb.lookup("ns:Bar"), Some("bar"));
        assert_eq!(kb.lookup("ns:Baz"), None);
    }

    #[test]
    fn lookup_skips_empty_documentation() {
        let kb = kb(r#"[{"ns:Foo": ""}, {"ns:Foo": "real"}]"#);
        assert_eq!(kb.lookup("ns:Foo"), Some("real"));
    }

    #[test]
    fn entries_keep_file_order_and_duplicates() {
        let kb = kb(r#"[{"z:B": "1", "a:A": "2"}, {"z:B": "3"}]"#);
        let keys: Vec<&str> = kb.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z:B", "a:A", "z:B"]);
        assert_eq!(kb.len(), 3);
    }

    #[test]
    fn non_string_value_is_rejected() {
        let err = KnowledgeBase::from_json(r#"[{"ok": "x"}, {"bad": 3}]"#).unwrap_err();
        match err {
            KbError::InvalidRecord { index, key } => {
                assert_eq!(index, 1);
                assert_eq!(key, "bad");
            }
            other => panic!("Expected InvalidRecord, got: {other:?}"),
        }
    }

    #[test]
    fn top_level_object_is_a_parse_error() {
        let err = KnowledgeBase::from_json(r#"{"ns:Foo": "x"}"#).unwrap_err();
        assert!(matches!(err, KbError::Parse(_)), "got: {err:?}");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = KnowledgeBase::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"), "got: {err}");
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, r#"[{"iso3166:GB": "UK"}]"#).unwrap();
        let kb = KnowledgeBase::load(&path).unwrap();
        assert_eq!(kb.lookup("iso3166:GB"), Some("UK"));
    }
}
