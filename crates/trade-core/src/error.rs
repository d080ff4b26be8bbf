//! Error types for trade-core

use thiserror::Error;

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for analysis operations
///
/// Every task node converts its internal failures into one of these
/// variants at its boundary; the engine records them per branch instead of
/// letting them propagate as unhandled faults.
#[derive(Error, Debug)]
pub enum Error {
    /// Data collaborator unreachable or returned a malformed response
    #[error("data fetch failed: {0}")]
    Fetch(String),

    /// Inference call failed or returned empty content
    #[error("inference failed: {0}")]
    Inference(String),

    /// No structured payload could be recovered from the model text
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// Structured payload did not match the expected shape
    #[error("unexpected payload shape: {0}")]
    Payload(String),

    /// Missing required field for the requested analysis type
    #[error("invalid request: {0}")]
    Validation(String),
}
