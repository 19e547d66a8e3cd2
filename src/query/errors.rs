//! Query compilation errors

use thiserror::Error;

/// Result type for query compilation
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while compiling a query
#[derive(Debug, Error)]
pub enum QueryError {
    /// Operator outside the supported set reached the compiler
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// Compiled document could not be serialized to a JSON string
    #[error("failed to serialize compiled query: {0}")]
    Json(#[from] serde_json::Error),
}
