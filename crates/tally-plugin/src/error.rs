//! Error types for tally-plugin

use thiserror::Error;

use crate::shape::ShapeError;

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Client error: {0}")]
    Client(#[from] tally_client::ClientError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PluginError>;
