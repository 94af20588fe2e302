//! Line-style validation: every clause line must end with `.`, `,` or `;`.
//!
//! The scan carries two flags across lines. `in_literal` flips on every line
//! with an odd number of `"`, and lines inside a literal are not checked.
//! `in_block` is set by `[` and cleared by `]` on the same line, and a line
//! that opens a bracket block may end with `[` instead of a terminator.

use lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};

use crate::text::{self, utf16_len};

/// `source` tag on every diagnostic this validator emits.
pub const SOURCE: &str = "ies-lsp";

pub const MESSAGE: &str = "Lines end with a dot, comma, or semicolon";

/// Byte order mark, trimmed along with whitespace.
const BOM: char = '\u{feff}';

/// Diagnostics for every badly terminated line, in line order.
pub fn validate(content: &str) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    let mut in_literal = false;
    let mut in_block = false;

    for (idx, raw) in text::lines(content).enumerate() {
        let line = raw.trim_matches(|c: char| c.is_whitespace() || c == BOM);

        if line.matches('"').count() % 2 != 0 {
            in_literal = !in_literal;
        }
        if in_literal || line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.contains('[') {
            in_block = true;
        }
        if line.contains(']') {
            in_block = false;
        }

        let terminated = line.ends_with(['.', ',', ';']);
        let opens_block = in_block && line.ends_with('[');
        if !terminated && !opens_block {
            diags.push(Diagnostic {
                range: Range::new(
                    Position::new(idx as u32, 0),
                    Position::new(idx as u32, utf16_len(line)),
                ),
                severity: Some(DiagnosticSeverity::ERROR),
                source: Some(SOURCE.to_string()),
                message: MESSAGE.to_string(),
                ..Default::default()
            });
        }
    }

    diags
}
