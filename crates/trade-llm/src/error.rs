//! Error types for inference operations

use thiserror::Error;

/// Result type for inference operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur when talking to the inference service
#[derive(Error, Debug)]
pub enum LLMError {
    /// API request failed
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Invalid API key or authentication failed
    #[error("Invalid API key or authentication failed")]
    AuthenticationFailed,

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Model call succeeded but returned no content
    #[error("Model returned empty content")]
    EmptyCompletion,

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// HTTP error
    #[cfg(feature = "groq")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl LLMError {
    /// Whether a retry could plausibly succeed
    ///
    /// Authentication, invalid-request, and empty-content failures are
    /// deterministic; transport-level faults and rate limits are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(_) | Self::RateLimitExceeded(_) => true,
            #[cfg(feature = "groq")]
            Self::HttpError(_) => true,
            _ => false,
        }
    }
}

/// Failure to recover a structured payload from model text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The text contained no fenced block and no brace-delimited candidate
    #[error("no structured payload found")]
    NotFound,

    /// A candidate substring was located but did not parse
    #[error("malformed payload: {snippet}")]
    Malformed {
        /// First ~200 characters of the candidate, for diagnostics
        snippet: String,
    },
}

impl From<LLMError> for trade_core::Error {
    fn from(err: LLMError) -> Self {
        trade_core::Error::Inference(err.to_string())
    }
}

impl From<ExtractionError> for trade_core::Error {
    fn from(err: ExtractionError) -> Self {
        trade_core::Error::Extraction(err.to_string())
    }
}
