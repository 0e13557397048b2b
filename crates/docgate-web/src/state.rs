//! Shared application state for the gateway.

use std::sync::Arc;

use docgate_client::EngineClient;
use docgate_common::{GatewayConfig, Result};

/// Shared state injected into every handler. Read-only after startup; the
/// gateway keeps no mutable state of its own.
#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub engine: EngineClient,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let engine = EngineClient::new(&config.engine_url, config.timeouts)?;
        Ok(Self { config, engine })
    }
}

pub type SharedState = Arc<AppState>;
