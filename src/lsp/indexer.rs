//! Instance → class index built from `instance a Class` declarations.

use std::collections::HashMap;

use super::patterns::DECLARATION;
use crate::text;

/// Mapping from instance token to its declared class token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceIndex {
    classes: HashMap<String, String>,
}

/// A single declaration learned outside a full re-index (see `hover`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPatch {
    pub instance: String,
    pub class: String,
}

impl InstanceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class_of(&self, instance: &str) -> Option<&str> {
        self.classes.get(instance).map(String::as_str)
    }

    pub fn insert(&mut self, instance: impl Into<String>, class: impl Into<String>) {
        self.classes.insert(instance.into(), class.into());
    }

    /// Whether applying `patch` would change this index.
    pub fn differs(&self, patch: &IndexPatch) -> bool {
        self.class_of(&patch.instance) != Some(patch.class.as_str())
    }

    /// A copy of this index with `patch` applied.
    pub fn patched(&self, patch: &IndexPatch) -> Self {
        let mut next = self.clone();
        next.insert(patch.instance.clone(), patch.class.clone());
        next
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Entries sorted by instance name.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .classes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }
}

/// Scan every line for a declaration; later declarations overwrite earlier ones.
pub fn index(content: &str) -> InstanceIndex {
    let mut idx = InstanceIndex::new();
    for line in text::lines(content) {
        if let Some(caps) = DECLARATION.captures(line) {
            idx.insert(&caps[1], &caps[2]);
        }
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_declaration() {
        let idx = index("data:A a ns:Foo .");
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.class_of("data:A"), Some("ns:Foo"));
    }

    #[test]
    fn later_declaration_wins() {
        let idx = index("data:A a ns:Foo .\ndata:B a ns:Bar .\ndata:A a ns:Baz .");
        assert_eq!(idx.class_of("data:A"), Some("ns:Baz"));
        assert_eq!(idx.class_of("data:B"), Some("ns:Bar"));
    }

    #[test]
    fn comments_and_literals_are_not_special() {
        let idx = index("# data:C a ns:InComment .\ndata:E ies:note \"\ndata:D a ns:InLiteral .\n\" .");
        assert_eq!(idx.class_of("data:C"), Some("ns:InComment"));
        assert_eq!(idx.class_of("data:D"), Some("ns:InLiteral"));
    }

    #[test]
    fn lines_without_declarations_contribute_nothing() {
        let idx = index("@prefix data: <http://d/> .\ndata:A ies:hasName \"A\" .\n");
        assert!(idx.is_empty(), "got: {idx:?}");
    }

    #[test]
    fn patch_leaves_source_index_intact() {
        let idx = index("data:A a ns:Foo .");
        let patch = IndexPatch {
            instance: "data:A".into(),
            class: "ns:Bar".into(),
        };
        assert!(idx.differs(&patch));
        let next = idx.patched(&patch);
        assert_eq!(next.class_of("data:A"), Some("ns:Bar"));
        assert_eq!(idx.class_of("data:A"), Some("ns:Foo"));
        assert!(!next.differs(&patch));
    }

    #[test]
    fn sorted_entries() {
        let idx = index("data:B a ns:X .\ndata:A a ns:Y .");
        assert_eq!(idx.sorted(), vec![("data:A", "ns:Y"), ("data:B", "ns:X")]);
    }
}
