//! Configuration loading for the gateway.
//! Everything comes from the environment (a local `.env` is honored);
//! `GATEWAY_SECRET` is the only required variable.

use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::{GatewayError, Result};

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Port the gateway listens on.
    pub port: u16,
    /// Base URL of the retrieval/answer engine.
    pub engine_url: String,
    /// Exact frontend origin allowed by CORS; `None` means permissive.
    pub allowed_origin: Option<String>,
    /// Shared bearer secret checked on protected routes.
    pub bearer_secret: SecretString,
    /// Whether `/api/clear-history` requires the bearer secret too.
    /// The original gateway left it open; kept as a policy switch.
    pub protect_clear_history: bool,
    pub timeouts: RelayTimeouts,
    /// Upper bound on one inbound multipart body.
    pub max_upload_bytes: usize,
}

/// Per-relay deadlines for the outbound leg. Ingestion runs parsing and
/// embedding on the engine side, so its bound is an order of magnitude above
/// the query bound; history and document listing are cheap list operations.
#[derive(Debug, Clone, Copy)]
pub struct RelayTimeouts {
    pub ingest: Duration,
    pub query: Duration,
    pub history: Duration,
    pub documents: Duration,
}

fn default_port() -> u16 { 3000 }
fn default_engine_url() -> String { "http://fastapi_rag:8000".to_string() }
fn default_ingest_timeout_secs() -> u64 { 1000 }
fn default_query_timeout_secs() -> u64 { 90 }
fn default_history_timeout_secs() -> u64 { 15 }
fn default_documents_timeout_secs() -> u64 { 5 }
fn default_max_upload_bytes() -> usize { 15 * 1024 * 1024 }

impl Default for RelayTimeouts {
    fn default() -> Self {
        Self {
            ingest:    Duration::from_secs(default_ingest_timeout_secs()),
            query:     Duration::from_secs(default_query_timeout_secs()),
            history:   Duration::from_secs(default_history_timeout_secs()),
            documents: Duration::from_secs(default_documents_timeout_secs()),
        }
    }
}

impl GatewayConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let bearer_secret = std::env::var("GATEWAY_SECRET")
            .map_err(|_| GatewayError::Config("GATEWAY_SECRET is not set".to_string()))?;

        Ok(Self {
            port: env_or("DOCGATE_PORT", default_port())?,
            engine_url: std::env::var("ENGINE_URL")
                .unwrap_or_else(|_| default_engine_url())
                .trim_end_matches('/')
                .to_string(),
            allowed_origin: std::env::var("ALLOWED_ORIGIN").ok().filter(|o| !o.is_empty()),
            bearer_secret: SecretString::from(bearer_secret),
            protect_clear_history: env_or("DOCGATE_PROTECT_CLEAR_HISTORY", false)?,
            timeouts: RelayTimeouts {
                ingest: Duration::from_secs(env_or(
                    "DOCGATE_INGEST_TIMEOUT_SECS",
                    default_ingest_timeout_secs(),
                )?),
                query: Duration::from_secs(env_or(
                    "DOCGATE_QUERY_TIMEOUT_SECS",
                    default_query_timeout_secs(),
                )?),
                history: Duration::from_secs(env_or(
                    "DOCGATE_HISTORY_TIMEOUT_SECS",
                    default_history_timeout_secs(),
                )?),
                documents: Duration::from_secs(env_or(
                    "DOCGATE_DOCUMENTS_TIMEOUT_SECS",
                    default_documents_timeout_secs(),
                )?),
            },
            max_upload_bytes: env_or("DOCGATE_MAX_UPLOAD_BYTES", default_max_upload_bytes())?,
        })
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| GatewayError::Config(format!("{key} has an invalid value: {raw:?}"))),
        Err(_) => Ok(default),
    }
}
