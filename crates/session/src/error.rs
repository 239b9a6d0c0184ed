//! Session store error type.

use storepulse_client::ClientError;
use thiserror::Error;

/// Errors that can occur in session store operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An operation requiring a token was called without one.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Login was rejected by the backend.
    #[error("authentication failed: {0}")]
    Auth(#[source] ClientError),

    /// A backend call other than login failed.
    #[error(transparent)]
    Api(#[from] ClientError),

    /// The persisted session blob could not be read at startup.
    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The persisted session blob is not valid JSON.
    #[error("corrupt session file: {0}")]
    Corrupt(#[from] serde_json::Error),
}
