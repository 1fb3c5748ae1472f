//! Error types for graph-store operations.

/// Error type for graph-store operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Failed to reach or authenticate against the store.
    #[error("connection error: {0}")]
    Connection(String),

    /// The store rejected or failed to execute an operation.
    #[error("backend error: {0}")]
    Backend(String),

    /// A result row could not be converted into the expected shape.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Result type for graph-store operations.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

impl From<neo4rs::Error> for GraphError {
    fn from(err: neo4rs::Error) -> Self {
        GraphError::Backend(err.to_string())
    }
}
