//! Error types for tally-client

use tally_rpc::ErrorPayload;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The request could not be encoded. Always a programming or
    /// configuration defect, never retried.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Network, connection, or timeout failure. One failed attempt is
    /// one reported failure; there is no retry.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not parseable as the wire envelope.
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The endpoint answered with a structured protocol error. The
    /// full payload is kept field-for-field for diagnosis.
    #[error("RPC endpoint responded with error: {0}")]
    Rpc(ErrorPayload),
}

pub type Result<T> = std::result::Result<T, ClientError>;
