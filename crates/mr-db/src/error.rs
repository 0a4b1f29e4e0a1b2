//! Error types for mr-db

use thiserror::Error;

/// Remote execution errors
///
/// Every variant is a transport-level failure: the endpoint never produced
/// a usable HTTP response. Non-success statuses are not errors here; they
/// are classified by the response policy.
#[derive(Error, Debug)]
pub enum DbError {
    /// Client construction or connection error (D001)
    #[error("[D001] Endpoint connection failed: {0}")]
    ConnectionError(String),

    /// Request timed out (D002)
    #[error("[D002] Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Other transport error, including unreadable responses (D003)
    #[error("[D003] Transport error: {0}")]
    Transport(String),

    /// Header value rejected, usually a malformed service key (D004)
    #[error("[D004] Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
