//! Language intelligence for IES triple notation. Pure functions, no transport.
//!
//! Uses `lsp-types` for standard data structures (Diagnostic, CompletionItem, etc.)
//! and computes everything synchronously from document text. The `server`
//! module owns document state and wires a `LanguageService` to the wire.

pub mod classify;
pub mod completion;
pub mod hover;
pub mod indexer;
pub mod patterns;
pub mod validator;

use std::sync::Arc;

use lsp_types::{CompletionItem, Diagnostic, Position};

use crate::kb::KnowledgeBase;
use self::hover::HoverOutcome;
use self::indexer::InstanceIndex;

/// Hover information for a position in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverInfo {
    /// Content to display (plain text).
    pub content: String,
    /// Optional range the hover applies to.
    pub range: Option<lsp_types::Range>,
}

/// In-process language service: pure functions, no transport.
pub trait LanguageService: Send + Sync + 'static {
    /// Compute diagnostics for the given content.
    fn diagnostics(&self, content: &str) -> Vec<Diagnostic>;

    /// Build the instance → class index for the given content.
    fn index(&self, content: &str) -> InstanceIndex;

    /// Compute completions at the given position.
    fn completions(&self, content: &str, pos: Position) -> Vec<CompletionItem>;

    /// Fill in the lazily computed parts of a completion item.
    fn resolve_completion(&self, item: CompletionItem) -> CompletionItem;

    /// Compute hover information at the given position.
    fn hover(&self, content: &str, index: &InstanceIndex, pos: Position) -> HoverOutcome;
}

/// Language service for triple notation documents, backed by a knowledge base.
#[derive(Clone)]
pub struct TripleService {
    kb: Arc<KnowledgeBase>,
}

impl TripleService {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl LanguageService for TripleService {
    fn diagnostics(&self, content: &str) -> Vec<Diagnostic> {
        validator::validate(content)
    }

    fn index(&self, content: &str) -> InstanceIndex {
        indexer::index(content)
    }

    fn completions(&self, content: &str, pos: Position) -> Vec<CompletionItem> {
        completion::complete(content, &self.kb, pos)
    }

    fn resolve_completion(&self, item: CompletionItem) -> CompletionItem {
        completion::resolve_item(&self.kb, item)
    }

    fn hover(&self, content: &str, index: &InstanceIndex, pos: Position) -> HoverOutcome {
        hover::resolve(content, index, &self.kb, pos)
    }
}
