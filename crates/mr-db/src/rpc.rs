//! HTTP RPC endpoint backend

use crate::error::{DbError, DbResult};
use crate::traits::{EndpointResponse, SqlEndpoint};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Service-role secret sent as both `apikey` and bearer token
#[derive(Clone)]
pub struct ServiceKey(String);

impl ServiceKey {
    /// Wrap a secret supplied through the CLI or environment
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ServiceKey(***)")
    }
}

/// Connection settings for an `rpc/exec_sql` route
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Base URL, e.g. `https://abc.supabase.co`
    pub base_url: String,

    /// Route appended to the base URL
    pub rpc_path: String,

    /// Secret for the `apikey` and `Authorization` headers
    pub service_key: ServiceKey,

    /// Per-request timeout
    pub timeout: Duration,
}

impl RpcConfig {
    /// Full URL the statements are POSTed to
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.rpc_path)
    }
}

#[derive(Debug, Serialize)]
struct ExecSqlRequest<'a> {
    query: &'a str,
}

/// SQL endpoint reached over HTTP(S)
pub struct RpcBackend {
    client: Client,
    url: String,
    headers: HeaderMap,
    timeout: Duration,
}

impl RpcBackend {
    /// Create a backend; no request is sent until `execute`
    pub fn new(config: &RpcConfig) -> DbResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DbError::ConnectionError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.endpoint_url(),
            headers: build_headers(&config.service_key)?,
            timeout: config.timeout,
        })
    }

    fn map_error(&self, err: reqwest::Error) -> DbError {
        if err.is_timeout() {
            DbError::Timeout(self.timeout)
        } else if err.is_connect() {
            DbError::ConnectionError(err.to_string())
        } else {
            DbError::Transport(err.to_string())
        }
    }
}

/// Build the fixed request headers
fn build_headers(key: &ServiceKey) -> DbResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static("prefer"),
        HeaderValue::from_static("return=minimal"),
    );

    let mut api_key = HeaderValue::from_str(key.expose()).map_err(|e| DbError::InvalidHeader {
        name: "apikey".to_string(),
        message: e.to_string(),
    })?;
    api_key.set_sensitive(true);
    headers.insert(HeaderName::from_static("apikey"), api_key);

    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", key.expose())).map_err(|e| {
        DbError::InvalidHeader {
            name: "authorization".to_string(),
            message: e.to_string(),
        }
    })?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);

    Ok(headers)
}

#[async_trait]
impl SqlEndpoint for RpcBackend {
    async fn execute(&self, sql: &str) -> DbResult<EndpointResponse> {
        log::debug!("POST {} ({} bytes of SQL)", self.url, sql.len());

        let response = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .json(&ExecSqlRequest { query: sql })
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        Ok(EndpointResponse { status, body })
    }

    fn endpoint_type(&self) -> &'static str {
        "rpc"
    }

    fn target(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
#[path = "rpc_test.rs"]
mod tests;
