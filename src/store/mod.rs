//! Document store holding the latest analysed snapshot per open document.
//!
//! Snapshots are immutable and shared as `Arc`s. Every change builds a new
//! snapshot from the full text and replaces the old one; hover repairs are
//! applied the same way, by swapping in a patched copy.

use std::collections::HashMap;
use std::sync::Arc;

use lsp_types::{Diagnostic, Url};

use crate::lsp::indexer::{IndexPatch, InstanceIndex};
use crate::lsp::LanguageService;

/// One analysed version of a document.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    pub text: Arc<str>,
    pub version: i32,
    pub index: InstanceIndex,
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentSnapshot {
    /// Run validation and indexing over the full text.
    pub fn analyze<S: LanguageService + ?Sized>(service: &S, text: String, version: i32) -> Self {
        let index = service.index(&text);
        let diagnostics = service.diagnostics(&text);
        Self {
            text: text.into(),
            version,
            index,
            diagnostics,
        }
    }

    fn patched(&self, patch: &IndexPatch) -> Self {
        Self {
            text: Arc::clone(&self.text),
            version: self.version,
            index: self.index.patched(patch),
            diagnostics: self.diagnostics.clone(),
        }
    }
}

/// Open documents keyed by URI. Last write wins.
#[derive(Debug, Default)]
pub struct DocumentStore {
    docs: HashMap<Url, Arc<DocumentSnapshot>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is stored for `uri`.
    pub fn upsert(&mut self, uri: Url, snapshot: DocumentSnapshot) -> Arc<DocumentSnapshot> {
        let snapshot = Arc::new(snapshot);
        self.docs.insert(uri, Arc::clone(&snapshot));
        snapshot
    }

    pub fn get(&self, uri: &Url) -> Option<Arc<DocumentSnapshot>> {
        self.docs.get(uri).cloned()
    }

    /// Apply a hover-time index repair.
    ///
    /// Ignored when the document is gone or has moved past `version`, since
    /// the patch was derived from older text. Returns whether it was applied.
    pub fn apply_patch(&mut self, uri: &Url, version: i32, patch: &IndexPatch) -> bool {
        let Some(current) = self.docs.get_mut(uri) else {
            return false;
        };
        if current.version != version || !current.index.differs(patch) {
            return false;
        }
        *current = Arc::new(current.patched(patch));
        true
    }

    pub fn remove(&mut self, uri: &Url) -> Option<Arc<DocumentSnapshot>> {
        self.docs.remove(uri)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
