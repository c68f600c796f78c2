//! RPC client implementation

use std::fmt;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tally_rpc::{RpcRequest, RpcResponse};
use tracing::debug;
use url::Url;

use crate::error::{ClientError, Result};

/// Connection settings for one client
///
/// Immutable once constructed and owned by exactly one [`RpcClient`].
#[derive(Clone)]
pub struct ClientConfig {
    /// Endpoint URL the request is POSTed to
    pub endpoint: Url,
    /// HTTP Basic username (may be empty)
    pub username: String,
    /// HTTP Basic password (may be empty; never logged)
    pub password: String,
    /// Upper bound on the whole exchange
    pub timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Client for a JSON-RPC endpoint
///
/// Holds no state between calls beyond its configuration; the HTTP
/// transport is exercised exactly once per [`RpcClient::call`].
pub struct RpcClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl RpcClient {
    /// Create a client from connection settings
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, config })
    }

    /// Get the configured endpoint
    pub fn endpoint(&self) -> &Url {
        &self.config.endpoint
    }

    /// Perform one JSON-RPC call and classify the outcome
    ///
    /// Success returns the decoded `result` value untouched; a missing
    /// `result` comes back as JSON null. The response `id` is not
    /// verified against the request's.
    pub async fn call(&self, req: &RpcRequest) -> Result<Value> {
        let body = serde_json::to_vec(req).map_err(ClientError::Serialization)?;

        debug!(method = %req.method, id = %req.id, endpoint = %self.config.endpoint, "issuing JSON-RPC request");

        // Basic credentials are attached even when both are empty.
        let res = self
            .http
            .post(self.config.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .basic_auth(&self.config.username, Some(&self.config.password))
            .body(body)
            .send()
            .await?;

        debug!(status = %res.status(), "received response");

        let bytes = res.bytes().await?;
        let decoded: RpcResponse =
            serde_json::from_slice(&bytes).map_err(ClientError::Decode)?;

        if let Some(payload) = decoded.error {
            return Err(ClientError::Rpc(payload));
        }

        Ok(decoded.result.unwrap_or(Value::Null))
    }
}
