use thiserror::Error;

/// Failure taxonomy for the gateway. Auth and validation variants are
/// resolved locally and never reach the engine; the `Upstream*` variants wrap
/// anything that went wrong on the outbound leg of a relay.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Accès refusé. Token manquant.")]
    MissingToken,

    #[error("Token invalide. Accès refusé.")]
    InvalidToken,

    #[error("{message}")]
    Validation {
        message: String,
        /// Offending filenames, when the failure is a per-file MIME check.
        invalid: Option<Vec<String>>,
    },

    #[error("engine unreachable: {0}")]
    UpstreamUnavailable(String),

    #[error("engine timed out: {0}")]
    UpstreamTimeout(String),

    #[error("engine returned {status}: {detail}")]
    UpstreamStatus { status: u16, detail: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into(), invalid: None }
    }

    /// The string surfaced in the error envelope's `details` field.
    /// For engine replies this is the engine's own declared `detail`; for
    /// transport failures it is the transport message, never a stack trace.
    pub fn upstream_detail(&self) -> Option<String> {
        match self {
            Self::UpstreamUnavailable(msg) | Self::UpstreamTimeout(msg) => Some(msg.clone()),
            Self::UpstreamStatus { detail, .. } => Some(detail.clone()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
