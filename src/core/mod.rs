//! Core types shared across the bridge
//!
//! - `BridgeError` - Error taxonomy for synthesis, loading and dispatch

pub mod error;

pub use error::{BridgeError, BridgeResult};
