//! Domain-level errors.
//!
//! Failures raised inside domain logic, such as credential hashing.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Errors raised by domain operations.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
