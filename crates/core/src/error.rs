//! Domain error model.

use serde::Serialize;
use thiserror::Error;

use crate::id::UserId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl core::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Domain-level error.
///
/// Everything except `Internal` is a deterministic, client-caused failure and
/// is reported as-is. `Internal` carries server-side detail only; the HTTP
/// layer never shows it to clients.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Bad pagination/sort parameter, bad id, or malformed body.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// One or more declarative field rules failed.
    #[error("validation failed: {}", join_violations(.0))]
    ValidationFailed(Vec<FieldViolation>),

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// No live record with this id. `available` lists the ids that do exist.
    #[error("user with ID {id} not found")]
    NotFound { id: UserId, available: Vec<UserId> },

    /// Missing or rejected credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Unexpected failure (e.g. a poisoned lock).
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::ValidationFailed(violations)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(id: UserId, available: Vec<UserId>) -> Self {
        Self::NotFound { id, available }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_lists_every_violation() {
        let err = DomainError::validation(vec![
            FieldViolation::new("name", "Name is required."),
            FieldViolation::new("email", "Email is required."),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: name: Name is required.; email: Email is required."
        );
    }

    #[test]
    fn not_found_display_names_the_id() {
        let err = DomainError::not_found(UserId::new(99).unwrap(), vec![UserId::FIRST]);
        assert_eq!(err.to_string(), "user with ID 99 not found");
    }
}
