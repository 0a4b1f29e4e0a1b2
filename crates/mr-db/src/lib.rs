//! mr-db - Remote SQL execution for Migrun
//!
//! This crate provides the `SqlEndpoint` trait, an HTTP implementation that
//! POSTs statements to an `rpc/exec_sql` route, and the executor that turns
//! HTTP responses into statement outcomes under a `ResponsePolicy`.

pub mod error;
pub mod executor;
pub mod policy;
pub mod rpc;
pub mod traits;

pub use error::{DbError, DbResult};
pub use executor::StatementExecutor;
pub use policy::{classify_response, StatementOutcome};
pub use rpc::{RpcBackend, RpcConfig, ServiceKey};
pub use traits::{EndpointResponse, SqlEndpoint};
