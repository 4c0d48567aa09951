//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Resource not found
    #[error("Resource not found")]
    NotFound,
    /// Validation error with message
    #[error("Validation error: {0}")]
    Validation(String),
    /// A record with the same identity already exists
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
