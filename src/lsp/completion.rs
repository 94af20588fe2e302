//! Entity-name completion from the knowledge base.
//!
//! Matching is deliberately loose: an entry is offered when the text before
//! the cursor ends with the entry's first character (case-insensitive).
//! Results follow knowledge base order and are not de-duplicated.

use lsp_types::{CompletionItem, CompletionItemKind, Documentation, MarkupContent, MarkupKind, Position};
use serde_json::json;

use crate::kb::KnowledgeBase;
use crate::text;

/// Key in `CompletionItem::data` naming the entry an item was built from.
const DATA_KEY: &str = "key";

/// Completion candidates at `pos`.
pub fn complete(content: &str, kb: &KnowledgeBase, pos: Position) -> Vec<CompletionItem> {
    let Some(line) = text::line_at(content, pos.line) else {
        return Vec::new();
    };
    let typed = line[..text::byte_offset(line, pos.character)].to_lowercase();
    if typed.is_empty() {
        return Vec::new();
    }

    kb.entries()
        .filter(|(key, _)| {
            key.chars()
                .next()
                .is_some_and(|first| typed.ends_with(&first.to_lowercase().to_string()))
        })
        .map(|(key, doc)| item_for(key, doc))
        .collect()
}

/// The completion item offered for one knowledge base entry.
pub fn item_for(key: &str, doc: &str) -> CompletionItem {
    CompletionItem {
        label: key.to_string(),
        kind: Some(CompletionItemKind::TEXT),
        detail: Some(doc.to_string()),
        documentation: Some(Documentation::String(format!(
            "This item represents a {key}."
        ))),
        insert_text: Some(key.to_string()),
        data: Some(json!({ DATA_KEY: key })),
        ..Default::default()
    }
}

/// Resolve-time enrichment: items that name a knowledge base entry get
/// Markdown documentation with the entry's text. Anything else passes through.
pub fn resolve_item(kb: &KnowledgeBase, mut item: CompletionItem) -> CompletionItem {
    let key = item
        .data
        .as_ref()
        .and_then(|data| data.get(DATA_KEY))
        .and_then(|key| key.as_str())
        .map(str::to_string);
    let Some(key) = key else {
        return item;
    };
    let Some(doc) = kb.lookup(&key) else {
        return item;
    };

    if item.detail.is_none() {
        item.detail = Some(doc.to_string());
    }
    item.documentation = Some(Documentation::MarkupContent(MarkupContent {
        kind: MarkupKind::Markdown,
        value: format!("**{key}**\n\n{doc}"),
    }));
    item
}
