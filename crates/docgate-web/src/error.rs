//! Uniform JSON error envelope.
//!
//! Every failure leaves the gateway as `{"error": message}` with an optional
//! `details` string (the engine's declared detail or the transport message)
//! and, for rejected batches, an `invalid` list of offending filenames.
//! Internal error chains are never forwarded verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use docgate_common::GatewayError;

const GENERIC_UPSTREAM_MESSAGE: &str = "Erreur lors de la communication avec le moteur.";

/// A `GatewayError` plus the route-specific message shown to the client when
/// the failure happened on the engine side.
#[derive(Debug)]
pub struct ApiError {
    kind: GatewayError,
    upstream_message: &'static str,
}

impl ApiError {
    /// Wrap a relay failure with the route's user-facing message.
    pub fn upstream(kind: GatewayError, message: &'static str) -> Self {
        Self { kind, upstream_message: message }
    }
}

impl From<GatewayError> for ApiError {
    fn from(kind: GatewayError) -> Self {
        Self { kind, upstream_message: GENERIC_UPSTREAM_MESSAGE }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.kind {
            GatewayError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": GatewayError::MissingToken.to_string() }),
            ),
            GatewayError::InvalidToken => (
                StatusCode::FORBIDDEN,
                json!({ "error": GatewayError::InvalidToken.to_string() }),
            ),
            GatewayError::Validation { message, invalid } => {
                let mut body = json!({ "error": message });
                if let Some(names) = invalid {
                    body["invalid"] = json!(names);
                }
                (StatusCode::BAD_REQUEST, body)
            }
            kind @ (GatewayError::UpstreamUnavailable(_)
            | GatewayError::UpstreamTimeout(_)
            | GatewayError::UpstreamStatus { .. }) => {
                error!(%kind, "relay failed");
                let mut body = json!({ "error": self.upstream_message });
                if let Some(details) = kind.upstream_detail() {
                    body["details"] = json!(details);
                }
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
            GatewayError::Config(msg) => {
                error!(%msg, "configuration error surfaced at request time");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Erreur interne du serveur." }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
