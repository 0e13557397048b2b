//! Ingested-document inventory relay.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ApiError;
use crate::state::SharedState;

pub const DOCUMENTS_FAILURE: &str = "Impossible de récupérer la liste des documents";

/// GET /api/documents — engine order and duplicates pass through as-is; an
/// absent upstream list becomes `[]`, never null.
pub async fn list_documents(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, ApiError> {
    let documents = state
        .engine
        .ingested_documents()
        .await
        .map_err(|e| ApiError::upstream(e, DOCUMENTS_FAILURE))?;

    Ok(Json(json!({ "documents": documents })))
}
