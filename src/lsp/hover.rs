//! Hover resolution for the token under the cursor.
//!
//! Only the cursor's line is inspected. A line that declares `instance a Class`
//! answers only for its instance and class; nothing else on it resolves.
//! Other lines try their shapes in precedence order, the first one that
//! produces text wins, and the knowledge base entry for the raw token is the
//! last resort.
//!
//! Resolution is pure. When the line declares `instance a Class` and the
//! index disagrees, the outcome carries an [`IndexPatch`] for the caller to
//! apply, so the index repairs itself lazily between full re-scans.

use lsp_types::{Position, Range};

use super::classify::{classify, LineShape};
use super::indexer::{IndexPatch, InstanceIndex};
use super::patterns::bare;
use super::HoverInfo;
use crate::kb::KnowledgeBase;
use crate::text::{self, Token};

/// Result of a hover query plus an optional index repair.
#[derive(Debug, Default, PartialEq)]
pub struct HoverOutcome {
    pub info: Option<HoverInfo>,
    pub patch: Option<IndexPatch>,
}

/// Resolve hover text for `pos` in `content`.
pub fn resolve(
    content: &str,
    index: &InstanceIndex,
    kb: &KnowledgeBase,
    pos: Position,
) -> HoverOutcome {
    let Some(line) = text::line_at(content, pos.line) else {
        return HoverOutcome::default();
    };
    let Some(token) = text::token_at(line, pos.character) else {
        return HoverOutcome::default();
    };

    let shapes = classify(line);
    let declaration = shapes
        .iter()
        .find(|shape| matches!(shape, LineShape::Declaration { .. }));
    let declared = declaration.and_then(|shape| match *shape {
        LineShape::Declaration { instance, class } => Some(IndexPatch {
            instance: instance.to_string(),
            class: class.to_string(),
        }),
        _ => None,
    });

    let lookup = Lookup {
        index,
        declared: declared.as_ref(),
        kb,
    };
    let word = bare(token.text);
    let found = match declaration {
        Some(shape) => lookup.for_shape(shape, word),
        None => shapes
            .iter()
            .find_map(|shape| lookup.for_shape(shape, word))
            .or_else(|| {
                kb.lookup(token.text)
                    .or_else(|| kb.lookup(word))
                    .map(str::to_string)
            }),
    };

    HoverOutcome {
        info: found.map(|content| HoverInfo {
            content,
            range: Some(token_range(pos.line, &token)),
        }),
        patch: declared.filter(|patch| index.differs(patch)),
    }
}

/// Class and documentation lookups, seeing the current line's declaration
/// as if it were already indexed.
struct Lookup<'a> {
    index: &'a InstanceIndex,
    declared: Option<&'a IndexPatch>,
    kb: &'a KnowledgeBase,
}

impl Lookup<'_> {
    fn class_of(&self, instance: &str) -> Option<String> {
        match self.declared {
            Some(patch) if patch.instance == instance => Some(patch.class.clone()),
            _ => self.index.class_of(instance).map(str::to_string),
        }
    }

    fn doc(&self, name: &str) -> Option<String> {
        self.kb.lookup(name).map(str::to_string)
    }

    fn for_shape(&self, shape: &LineShape<'_>, word: &str) -> Option<String> {
        match *shape {
            LineShape::Declaration { instance, class } => {
                if word == class {
                    self.doc(class)
                } else if word == instance {
                    Some(class.to_string())
                } else {
                    None
                }
            }
            LineShape::PredicateObject {
                subject,
                predicate,
                object,
            } => {
                let as_object = (word == object).then(|| self.class_of(object)).flatten();
                let as_predicate = || (word == predicate).then(|| self.doc(predicate)).flatten();
                let as_subject = || (word == subject).then(|| self.class_of(subject)).flatten();
                as_object.or_else(as_predicate).or_else(as_subject)
            }
            LineShape::StandaloneReference { entity } => {
                self.class_of(entity).or_else(|| self.doc(entity))
            }
            LineShape::LiteralAssignment { instance, .. } => {
                (word == instance).then(|| self.class_of(instance)).flatten()
            }
            LineShape::Unmatched => None,
        }
    }
}

fn token_range(line: u32, token: &Token<'_>) -> Range {
    Range::new(
        Position::new(line, token.start),
        Position::new(line, token.end),
    )
}
