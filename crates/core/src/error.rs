//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only caller-facing input problems live here. A well-formed input always
/// produces a decision, so there is no "engine failed" variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A demand or stock collection is missing required fields or carries
    /// malformed values. Raised before any evaluation starts.
    #[error("input shape error: {0}")]
    InputShape(String),

    /// A configuration value failed validation (policy, multiplier, mode).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn input_shape(msg: impl Into<String>) -> Self {
        Self::InputShape(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
