//! Conversational-history reset relay.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ApiError;
use crate::state::SharedState;

pub const RESET_FAILURE: &str = "Erreur lors de la réinitialisation de l'historique.";

/// POST /api/clear-history — idempotent: resetting an already-empty history
/// succeeds. Whether this route is bearer-guarded is a router-level policy.
pub async fn reset_history(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, ApiError> {
    let data = state
        .engine
        .clear_history()
        .await
        .map_err(|e| ApiError::upstream(e, RESET_FAILURE))?;

    Ok(Json(json!({
        "status": "success",
        "message": "L'historique a été vidé avec succès.",
        "data": data,
    })))
}
