//! Shared error type across Nexus Analytics crates.

use thiserror::Error;

/// Client-facing error kinds (stable API, also used as metric tag values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid input / malformed request body.
    BadRequest,
    /// Business query could not be processed.
    QueryFailed,
    /// Internal server error.
    Internal,
}

impl ErrorKind {
    /// String representation used in metric tags and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::QueryFailed => "query_failed",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, NexaError>;

/// Unified error type used by core and service.
#[derive(Debug, Error)]
pub enum NexaError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl NexaError {
    /// Map internal error to a stable client-facing kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NexaError::BadRequest(_) => ErrorKind::BadRequest,
            NexaError::QueryFailed(_) => ErrorKind::QueryFailed,
            NexaError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to expose to clients. Internal detail stays in the logs.
    pub fn detail(&self) -> &'static str {
        match self {
            NexaError::BadRequest(_) => "Invalid request",
            NexaError::QueryFailed(_) => "Query processing failed",
            NexaError::Internal(_) => "Internal server error",
        }
    }
}
