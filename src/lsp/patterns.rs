//! Regular expressions for the clause shapes the services recognise.
//!
//! A namespaced token is `prefix:local` with no whitespace. Clause-final
//! tokens are matched lazily so a glued terminator (`ns:Foo.`) is not
//! captured as part of the token.

use std::sync::LazyLock;

use regex::Regex;

/// Characters that end a clause.
pub const TERMINATORS: [char; 3] = ['.', ';', ','];

/// `instance a Class`, optionally terminated.
pub static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\S+:\S+)\s+a\s+(\S+:\S+?)[.;,]?(?:\s|$)").expect("declaration pattern")
});

/// `subject predicate object` with three namespaced tokens.
pub static PREDICATE_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\S+:\S+)\s+(\S+:\S+)\s+(\S+:\S+?)[.;,]?(?:\s|$)")
        .expect("predicate-object pattern")
});

/// A namespaced token closing the line, optionally terminated.
pub static STANDALONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\S+:\S+?)\s*[.;,]?\s*$").expect("standalone pattern")
});

/// `instance predicate "literal"` closing the line.
pub static LITERAL_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\S+:\S+)\s+(\S+:\S+)\s+"[^"]*"\s*[.;,]?\s*$"#)
        .expect("literal-assignment pattern")
});

/// `token` without any trailing terminator characters.
pub fn bare(token: &str) -> &str {
    token.trim_end_matches(TERMINATORS)
}
