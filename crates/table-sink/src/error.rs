//! Error type shared by all sink implementations.

/// Errors reported by a `TableSink`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    /// The database could not be reached or the transport failed mid-request.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The database answered but refused the statement.
    #[error("Statement rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The database's response could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}
