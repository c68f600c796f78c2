//! JSON-RPC wire envelope types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Protocol tag sent on every request.
///
/// The endpoints this plugin talks to expect the literal "1.0" even
/// though the rest of the envelope resembles JSON-RPC 2.0.
pub const PROTOCOL_VERSION: &str = "1.0";

/// An outgoing JSON-RPC request
///
/// One request per call: each carries a freshly generated correlation
/// ID and is never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Protocol tag, always [`PROTOCOL_VERSION`]
    pub jsonrpc: String,

    /// Correlation ID (UUID v4; uniqueness, not secrecy)
    pub id: String,

    /// Method name
    pub method: String,

    /// Positional parameters, passed through unvalidated
    pub params: Vec<Value>,
}

impl RpcRequest {
    /// Build a request for the given method and positional parameters
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: PROTOCOL_VERSION.to_string(),
            id: Uuid::new_v4().to_string(),
            method: method.into(),
            params,
        }
    }
}

/// An incoming JSON-RPC response
///
/// Malformed servers may omit or null any field; all three are
/// optional so a partial response decodes rather than erroring. The
/// `id` is not checked against the request's correlation ID.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    /// Result value, present on success
    #[serde(default)]
    pub result: Option<Value>,

    /// Error payload, present on failure
    #[serde(default)]
    pub error: Option<ErrorPayload>,

    /// Echo of the request's correlation ID
    #[serde(default)]
    pub id: Option<String>,
}

impl RpcResponse {
    /// True when the endpoint reported a protocol-level failure
    ///
    /// A JSON `null` error decodes to `None` and counts as success;
    /// any present object, even an empty one, is a failure.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Structured error payload from an endpoint
///
/// Arbitrary diagnostic key/value fields. Displayed field-for-field as
/// JSON so nothing the remote side reported is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorPayload(pub serde_json::Map<String, Value>);

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}
