//! Error types and result handling for ticket operations.
//!
//! Defines the error taxonomy shared by validation, storage, and the ticket
//! service. Validation and not-found errors are the client's fault and map
//! to 4xx responses; database errors are the server's fault and map to 5xx
//! responses without leaking internal detail.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for ticket lifecycle operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Submitted input failed validation. No persistence was attempted.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending input field.
        field: &'static str,
        /// Human-readable description of the problem.
        message: String,
    },

    /// Referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Database operation failed. The enclosing transaction was rolled back.
    #[error("database error: {0}")]
    Database(String),

    /// Constraint violation.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

impl CoreError {
    /// Creates a validation error for the given field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { field, message: message.into() }
    }
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound("requested entity not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::ConstraintViolation(format!("unique constraint violation: {}", db_err))
            },
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                Self::ConstraintViolation(format!("foreign key constraint violation: {}", db_err))
            },
            _ => Self::Database(err.to_string()),
        }
    }
}
