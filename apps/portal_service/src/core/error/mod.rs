mod conversions;

use thiserror::Error;

use crate::forum::forum_board::ForumError;

/// Errors the HTTP layer reports for the caller's own input. Generation
/// failures never end up here; they resolve to fallback payloads.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidInput(String),

    #[error("Forum error: {0}")]
    Forum(#[from] ForumError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Unknown LLM provider: {0}")]
    UnknownProvider(String),
}
