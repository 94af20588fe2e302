//! ies-lsp: language intelligence for IES triple notation.
//!
//! Validates clause termination, keeps an instance → class index per open
//! document, and answers hover and completion from a documentation
//! knowledge base. The analysis in `lsp` is pure; `server` adapts it to
//! tower-lsp.

pub mod config;
pub mod kb;
pub mod lsp;
pub mod server;
pub mod store;
pub mod text;
