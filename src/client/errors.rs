//! Client error types

use thiserror::Error;

/// Result type for backend client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the backend client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection, timeout, TLS)
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("backend returned status {status}: {body}")]
    Backend { status: u16, body: String },

    /// Response body could not be decoded
    #[error("invalid response payload: {0}")]
    Json(#[from] serde_json::Error),
}
