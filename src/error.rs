//! Generation errors.
//!
//! Every failure is fatal: an incomplete grammar would silently misclassify
//! tokens, so there is no degraded output mode and nothing is retried.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("cannot read source {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed source {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("category `{category}` is not listed in the precedence order")]
    UnlistedCategory { category: String },

    #[error("category `{category}` is listed more than once in the precedence order")]
    DuplicatePrecedence { category: String },

    #[error("rule `{rule}` produced an invalid pattern: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("cannot serialize grammar: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GrammarError>;
