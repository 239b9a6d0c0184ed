//! Adapter error type.

use thiserror::Error;

/// Errors that can occur when calling the dashboard backend.
///
/// A body that cannot be parsed as the response envelope is reported as a
/// [`ClientError::Request`] with a generic message rather than a distinct
/// parse variant; callers only ever see a human-readable failure string.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-2xx status or an error envelope.
    #[error("{message}")]
    Request {
        /// HTTP status code of the response.
        status: u16,
        /// Backend-supplied message, or a generic fallback.
        message: String,
    },
}

impl ClientError {
    /// Build a request failure from a status code and an optional backend
    /// message.
    #[must_use]
    pub fn request(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Self::Request { status, message }
    }

    /// Build a request failure for a body that is not valid envelope JSON.
    #[must_use]
    pub fn invalid_body(status: u16) -> Self {
        Self::Request {
            status,
            message: "invalid response body".to_owned(),
        }
    }
}
