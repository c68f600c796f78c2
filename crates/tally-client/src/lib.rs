//! Tally Client - HTTP transport for the JSON-RPC exchange
//!
//! This crate provides:
//! - Connection configuration (endpoint, credentials, timeout)
//! - A client performing exactly one call per request
//! - Classification of failures into a typed error taxonomy

pub mod client;
pub mod error;

pub use client::*;
pub use error::*;
