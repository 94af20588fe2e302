//! Knowledge base loading errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KbError {
    #[error("cannot read knowledge base {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("knowledge base is not a JSON array of objects: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("record {index}: value for '{key}' is not a string")]
    InvalidRecord { index: usize, key: String },
}

pub type KbResult<T> = Result<T, KbError>;
