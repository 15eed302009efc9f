//! Error types for task domain validation and parsing.

use super::TaskField;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A field failed one of the declared validation rules.
    #[error("invalid {field}: {message}")]
    InvalidField {
        /// Field that failed validation.
        field: TaskField,
        /// Message attached to the failing rule.
        message: &'static str,
    },
}

impl TaskDomainError {
    /// Returns the field that failed validation.
    #[must_use]
    pub const fn field(&self) -> TaskField {
        match self {
            Self::InvalidField { field, .. } => *field,
        }
    }

    /// Returns the message of the failing rule.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::InvalidField { message, .. } => message,
        }
    }
}

/// Error returned while parsing list sort keys or directions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort option: {0}")]
pub struct ParseSortError(pub String);
