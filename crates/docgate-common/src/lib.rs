//! docgate-common — Shared errors, configuration, and wire types used by the
//! gateway's client and web crates.

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{GatewayConfig, RelayTimeouts};
pub use error::{GatewayError, Result};
