//! Error types for webhook notification.
//!
//! Notification errors never leave this crate's notifier boundary: the
//! trait implementation logs them and returns control. The taxonomy exists
//! so the log lines carry a useful failure category.

use thiserror::Error;

/// Result type alias for notification operations.
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Failure categories for an outbound notification attempt.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Network-level connectivity failure.
    #[error("connection failed: {message}")]
    Connection {
        /// Error message describing the network failure
        message: String,
    },

    /// Request timeout exceeded.
    #[error("request timeout after {timeout_seconds}s")]
    Timeout {
        /// Number of seconds before the request timed out
        timeout_seconds: u64,
    },

    /// Endpoint responded with a non-2xx status.
    #[error("endpoint returned HTTP {status}")]
    UnexpectedStatus {
        /// HTTP status code returned by the endpoint
        status: u16,
    },

    /// The HTTP client could not be configured.
    #[error("invalid notifier configuration: {message}")]
    Configuration {
        /// Description of the configuration problem
        message: String,
    },
}
