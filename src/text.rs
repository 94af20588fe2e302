//! Line and column helpers.
//!
//! LSP positions count UTF-16 code units, while Rust strings index bytes.
//! Everything that turns a `Position` into a slice goes through here.

/// Split text into lines on `\n`, dropping a trailing `\r` from each.
///
/// Unlike `str::lines`, a trailing newline yields a final empty line, so
/// line numbers match what an editor shows.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l))
}

/// The line at `index`, if the document has one.
pub fn line_at(text: &str, index: u32) -> Option<&str> {
    lines(text).nth(index as usize)
}

/// Length of `s` in UTF-16 code units.
pub fn utf16_len(s: &str) -> u32 {
    s.chars().map(|c| c.len_utf16() as u32).sum()
}

/// Byte offset of UTF-16 column `col` in `line`, clamped to the line end.
pub fn byte_offset(line: &str, col: u32) -> usize {
    let mut units = 0u32;
    for (idx, ch) in line.char_indices() {
        if units >= col {
            return idx;
        }
        units += ch.len_utf16() as u32;
    }
    line.len()
}

/// A whitespace-delimited token with its UTF-16 column span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: u32,
    pub end: u32,
}

/// Whitespace tokens of `line`, in order, with their column spans.
pub fn tokens(line: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut offset = 0usize;
    for text in line.split_whitespace() {
        let start = line[offset..].find(text).unwrap_or(0) + offset;
        offset = start + text.len();
        let start_col = utf16_len(&line[..start]);
        out.push(Token {
            text,
            start: start_col,
            end: start_col + utf16_len(text),
        });
    }
    out
}

/// The first token whose span contains `col` (both ends inclusive).
pub fn token_at(line: &str, col: u32) -> Option<Token<'_>> {
    tokens(line)
        .into_iter()
        .find(|t| t.start <= col && col <= t.end)
}
