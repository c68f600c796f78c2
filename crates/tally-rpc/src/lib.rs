//! Tally RPC - JSON-RPC protocol definitions
//!
//! This crate defines:
//! - The request/response wire envelope
//! - Request construction with per-call correlation IDs
//! - The structured error payload returned by endpoints

pub mod types;

pub use types::*;
