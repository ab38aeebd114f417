//! Error types for the Yandex.Audience API client.
//!
//! Every response envelope of the management API may carry a structured
//! error block. [`ApiError`] is that block; [`Error`] is the crate-wide
//! error that wraps it alongside transport, decoding and client-state
//! failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A specialized `Result` type for Yandex.Audience operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Yandex.Audience API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading an upload source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The response envelope carried a non-empty error list
    #[error("API error: {0}")]
    Api(ApiError),

    /// Non-2xx status without a structured error list
    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// No token in the environment and no fallback value supplied
    #[error("yandex audience token isn't set")]
    TokenNotSet,

    /// The client was closed and can no longer send requests
    #[error("client is closed")]
    ClientClosed,

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The server answered `success: false` to a delete request
    #[error("not deleted")]
    NotDeleted,

    /// The server answered `success: false` to an undelete request
    #[error("not restored")]
    NotRestored,

    /// The server answered `success: false` to a reprocess request
    #[error("not reprocessed")]
    NotReprocessed,

    /// An upload returned neither a segment id nor an error list
    #[error("not created: unexpected response shape")]
    NotCreated,

    /// The multipart producer task failed
    #[error("Upload error: {0}")]
    Upload(String),
}

impl Error {
    /// Returns `true` if the server reported a structured API error.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api(_))
    }

    /// Returns the structured API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` for the `success: false` / missing-id conditions that
    /// arrive without an error list.
    pub fn is_sentinel(&self) -> bool {
        matches!(
            self,
            Error::NotDeleted | Error::NotRestored | Error::NotReprocessed | Error::NotCreated
        )
    }
}

/// A single entry of the `errors` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error class, e.g. `backend_error`
    #[serde(default)]
    pub error_type: String,
    /// Human-readable description
    #[serde(default)]
    pub message: String,
    /// Where the error was detected (field or request part)
    #[serde(default)]
    pub location: String,
}

/// The structured error block embedded in every response envelope.
///
/// On successful responses all fields are absent and decode to their
/// defaults; only a non-empty [`errors`](Self::errors) list marks a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Individual errors
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
    /// HTTP-like status code reported by the API
    #[serde(default)]
    pub code: u16,
    /// Top-level message
    #[serde(default)]
    pub message: String,
}

impl ApiError {
    /// Returns `true` if the block reports at least one error.
    pub fn is_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let details = serde_json::to_string(&self.errors).unwrap_or_default();
        write!(f, "{}: {} ([{}])", self.code, self.message, details)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_error() -> ApiError {
        ApiError {
            errors: vec![ApiErrorDetail {
                error_type: "backend_error".into(),
                message: "simple error".into(),
                location: "right here".into(),
            }],
            code: 503,
            message: "simple error".into(),
        }
    }

    #[test]
    fn test_api_error_display() {
        let err = backend_error();
        assert_eq!(
            err.to_string(),
            r#"503: simple error ([[{"error_type":"backend_error","message":"simple error","location":"right here"}]])"#
        );
    }

    #[test]
    fn test_api_error_defaults_on_success_body() {
        let err: ApiError = serde_json::from_str(r#"{"accounts": []}"#).unwrap();
        assert!(!err.is_error());
        assert_eq!(err.code, 0);
        assert!(err.message.is_empty());
    }

    #[test]
    fn test_error_classification() {
        let err = Error::from(backend_error());
        assert!(err.is_api_error());
        assert_eq!(err.api_error().map(|e| e.code), Some(503));
        assert!(!err.is_sentinel());

        assert!(Error::NotDeleted.is_sentinel());
        assert!(Error::NotRestored.is_sentinel());
        assert!(Error::NotCreated.is_sentinel());
        assert!(!Error::ClientClosed.is_sentinel());
        assert!(Error::TokenNotSet.api_error().is_none());
    }

    #[test]
    fn test_sentinel_messages() {
        assert_eq!(Error::NotDeleted.to_string(), "not deleted");
        assert_eq!(Error::NotRestored.to_string(), "not restored");
        assert_eq!(Error::TokenNotSet.to_string(), "yandex audience token isn't set");
    }
}
