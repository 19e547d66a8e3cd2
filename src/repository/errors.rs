//! Repository error types

use thiserror::Error;

use crate::client::ClientError;
use crate::query::QueryError;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Query compilation failed
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Backend call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Entity (de)serialization failed
    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
