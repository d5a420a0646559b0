//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building stub sets or cases.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A stub path is empty or does not start with `/`.
    #[error("invalid stub path: {0:?}")]
    InvalidStubPath(String),

    /// A stub was registered for a path that already has one.
    #[error("duplicate stub for path {0:?}")]
    DuplicateStubPath(String),

    /// A stub status code is outside the servable `200..=599` range.
    #[error("invalid stub status code: {0}")]
    InvalidStatus(u16),

    /// A response body was configured for a status that must not carry one.
    #[error("status {0} does not allow a response body")]
    BodyNotAllowed(u16),

    /// A stub header name is empty or not a valid header token.
    #[error("invalid header name: {0:?}")]
    InvalidHeaderName(String),

    /// A stub header value contains control characters.
    #[error("invalid header value for {0:?}")]
    InvalidHeaderValue(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
