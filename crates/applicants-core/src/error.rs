//! Error types for applicant record operations.
//!
//! A single [`Error`] covers every way a store or synchronization call can
//! fail. The variants mirror how the caller is expected to react: retry
//! later ([`Error::StoreUnavailable`]), fix the request
//! ([`Error::StoreRejected`], [`Error::InvalidInput`]), refresh the view
//! ([`Error::NotFound`]), report a broken store ([`Error::MalformedData`])
//! or simply wait ([`Error::InFlight`]).

use std::fmt;
use thiserror::Error;

use crate::types::ApplicantId;

/// The unified error type for applicant operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The store could not be reached (connection, DNS, timeout, IO).
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] TransportError),

    /// The store answered but refused the request.
    #[error("store rejected request: {0}")]
    StoreRejected(#[from] RejectedError),

    /// The operation targeted an id the store does not hold.
    #[error("applicant {id} not found")]
    NotFound { id: ApplicantId },

    /// Input failed validation before any request was made.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The store answered, but its data could not be decoded.
    #[error("malformed store data: {message}")]
    MalformedData { message: String },

    /// An identical operation is already waiting on the store.
    #[error("{operation} is already in flight")]
    InFlight { operation: String },
}

impl Error {
    /// Shorthand for [`Error::NotFound`].
    pub fn not_found(id: ApplicantId) -> Self {
        Error::NotFound { id }
    }

    /// Shorthand for [`Error::MalformedData`].
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedData {
            message: message.into(),
        }
    }

    /// Returns true if the error says the target id does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Local storage could not be read or written.
    #[error("IO error: {message}")]
    Io { message: String },

    /// Generic HTTP error (body decoding, redirects, ...).
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StoreUnavailable(TransportError::from(err))
    }
}

/// A refusal reported by the store.
#[derive(Debug)]
pub struct RejectedError {
    /// HTTP status code (or its equivalent for non-HTTP stores).
    pub status: u16,
    /// Machine-readable error code, if the store sent one.
    pub error: Option<String>,
    /// Human-readable message, if the store sent one.
    pub message: Option<String>,
}

impl RejectedError {
    /// Create a new rejection.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Returns true for 4xx statuses.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}

impl fmt::Display for RejectedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for RejectedError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid applicant id.
    #[error("invalid applicant id '{value}': {reason}")]
    ApplicantId { value: String, reason: String },

    /// Invalid store URL.
    #[error("invalid store URL '{value}': {reason}")]
    StoreUrl { value: String, reason: String },

    /// A patch that would change nothing.
    #[error("patch for applicant {id} changes no fields")]
    EmptyPatch { id: ApplicantId },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_includes_code_and_message() {
        let err = RejectedError::new(
            400,
            Some("InvalidRequest".to_string()),
            Some("missing email".to_string()),
        );
        assert_eq!(err.to_string(), "HTTP 400 [InvalidRequest]: missing email");
        assert!(err.is_client_error());
    }

    #[test]
    fn rejected_display_status_only() {
        let err = RejectedError::new(503, None, None);
        assert_eq!(err.to_string(), "HTTP 503");
        assert!(!err.is_client_error());
    }

    #[test]
    fn io_errors_are_store_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(io);
        assert!(matches!(err, Error::StoreUnavailable(TransportError::Io { .. })));
    }

    #[test]
    fn json_errors_are_malformed_data() {
        let json = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = Error::from(json);
        assert!(matches!(err, Error::MalformedData { .. }));
        assert!(err.to_string().starts_with("malformed store data"));
    }

    #[test]
    fn not_found_message() {
        let err = Error::not_found(ApplicantId::new(7));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "applicant 7 not found");
    }
}
