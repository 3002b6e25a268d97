//! Error types for backend API operations.

use thiserror::Error;

/// Error type for backend client operations.
///
/// Every failure surfaced by [`PrepdeckClient`](crate::client::PrepdeckClient)
/// is normalized into one of these kinds with a human-readable message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed at the transport level (connect, read, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned a non-success status.
    ///
    /// `message` is the `message` field of the JSON error body when the
    /// server provided one, otherwise a synthesized description that
    /// includes the status code.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    /// Check if the failure is likely transient.
    ///
    /// The client never retries on its own; callers can use this to decide.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Http(e) => e.is_timeout() || e.is_connect(),
            ApiError::Json(_) => false,
            ApiError::Server { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
        }
    }
}
