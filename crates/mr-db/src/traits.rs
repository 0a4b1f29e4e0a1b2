//! SQL endpoint trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Raw HTTP answer to one statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body, empty under `Prefer: return=minimal`
    pub body: String,
}

/// A remote route that executes one SQL string per call
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait SqlEndpoint: Send + Sync {
    /// Send one statement; `Err` only for transport failures
    async fn execute(&self, sql: &str) -> DbResult<EndpointResponse>;

    /// Endpoint type identifier for logging
    fn endpoint_type(&self) -> &'static str;

    /// Human-readable target, never containing credentials
    fn target(&self) -> String;
}
