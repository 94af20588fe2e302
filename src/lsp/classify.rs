//! Line classification for hover.
//!
//! A line can fit several clause shapes at once (a declaration line also
//! ends in a standalone reference). `classify` reports every shape that
//! fits, in the order hover tries them.

use super::patterns::{DECLARATION, LITERAL_ASSIGNMENT, PREDICATE_OBJECT, STANDALONE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape<'a> {
    /// `instance a Class`
    Declaration { instance: &'a str, class: &'a str },
    /// `subject predicate object`
    PredicateObject {
        subject: &'a str,
        predicate: &'a str,
        object: &'a str,
    },
    /// A namespaced token closing the line.
    StandaloneReference { entity: &'a str },
    /// `instance predicate "literal"`
    LiteralAssignment { instance: &'a str, predicate: &'a str },
    /// None of the above.
    Unmatched,
}

/// All shapes `line` fits, highest precedence first. Never empty.
pub fn classify(line: &str) -> Vec<LineShape<'_>> {
    let mut shapes = Vec::new();

    if let Some(c) = DECLARATION.captures(line) {
        if let (Some(instance), Some(class)) = (c.get(1), c.get(2)) {
            shapes.push(LineShape::Declaration {
                instance: instance.as_str(),
                class: class.as_str(),
            });
        }
    }
    if let Some(c) = PREDICATE_OBJECT.captures(line) {
        if let (Some(subject), Some(predicate), Some(object)) = (c.get(1), c.get(2), c.get(3)) {
            shapes.push(LineShape::PredicateObject {
                subject: subject.as_str(),
                predicate: predicate.as_str(),
                object: object.as_str(),
            });
        }
    }
    if let Some(entity) = STANDALONE.captures(line).and_then(|c| c.get(1)) {
        shapes.push(LineShape::StandaloneReference {
            entity: entity.as_str(),
        });
    }
    if let Some(c) = LITERAL_ASSIGNMENT.captures(line) {
        if let (Some(instance), Some(predicate)) = (c.get(1), c.get(2)) {
            shapes.push(LineShape::LiteralAssignment {
                instance: instance.as_str(),
                predicate: predicate.as_str(),
            });
        }
    }

    if shapes.is_empty() {
        shapes.push(LineShape::Unmatched);
    }
    shapes
}
