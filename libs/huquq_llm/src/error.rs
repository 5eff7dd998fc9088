use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("Failed to send request to {provider}: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned error status: {status}, body: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} API error: {message}")]
    Api {
        provider: &'static str,
        code: Option<String>,
        message: String,
        /// Set for rate limiting and server-side failures.
        transient: bool,
    },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Response contained no text")]
    EmptyResponse,

    #[error("Response does not match output contract `{contract}`: {reason}")]
    ContractViolation { contract: String, reason: String },

    #[error("Output contract `{contract}` is invalid: {reason}")]
    InvalidContract { contract: String, reason: String },

    #[error("Request `{0}` carries no output contract")]
    MissingContract(String),
}

/// Coarse classification of a failed generation, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Nothing usable reached us: network error, non-2xx status, provider failure.
    Transport,
    Timeout,
    /// A response arrived but could not be read as the declared structure.
    MalformedOutput,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Transport => "transport",
            FailureKind::Timeout => "timeout",
            FailureKind::MalformedOutput => "malformed_output",
        }
    }
}

impl LLMError {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            LLMError::Request { .. }
            | LLMError::Status { .. }
            | LLMError::Api { .. }
            | LLMError::Provider(_) => FailureKind::Transport,
            LLMError::Timeout(_) => FailureKind::Timeout,
            LLMError::EmptyResponse
            | LLMError::ContractViolation { .. }
            | LLMError::InvalidContract { .. }
            | LLMError::MissingContract(_) => FailureKind::MalformedOutput,
        }
    }

    /// Only transient transport failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            LLMError::Request { .. } | LLMError::Timeout(_) => true,
            LLMError::Status { status, .. } => *status == 429 || *status >= 500,
            LLMError::Api { transient, .. } => *transient,
            _ => false,
        }
    }
}
