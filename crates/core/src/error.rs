//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic business failures live here. Secondary data sources that
/// are allowed to fail (e.g. purchase-order arrivals) degrade to defaults
/// instead of surfacing through this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input, bad configuration).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced resource does not exist. Carries a human-readable subject
    /// such as `project`, `BOM` or `machine`.
    #[error("{0} not found")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(subject: impl Into<String>) -> Self {
        Self::NotFound(subject.into())
    }

    /// `true` when the caller supplied something unusable (4xx-style), as
    /// opposed to a broken invariant inside the system.
    pub fn is_client_error(&self) -> bool {
        match self {
            DomainError::Validation(_) | DomainError::InvalidId(_) | DomainError::NotFound(_) => {
                true
            }
            DomainError::InvariantViolation(_) => false,
        }
    }
}
