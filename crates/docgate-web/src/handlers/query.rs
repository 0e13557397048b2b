//! Question relay: validate, forward, reshape.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use docgate_common::error::{GatewayError, Result};

use crate::error::ApiError;
use crate::state::SharedState;

pub const QUERY_FAILURE: &str = "Erreur lors de la récupération de la réponse du RAG.";

const MIN_QUESTION_CHARS: usize = 3;
const MAX_QUESTION_CHARS: usize = 500;
const MIN_LIMIT: u32 = 1;
const MAX_LIMIT: u32 = 50;
const DEFAULT_LIMIT: u32 = 15;

/// Raw query parameters. `limit` stays a string until validated so a
/// non-numeric value gets the same envelope as an out-of-range one.
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    pub question: Option<String>,
    pub limit: Option<String>,
}

/// GET /api/query — relay a validated question to the engine.
pub async fn ask_question(
    State(state): State<SharedState>,
    Query(params): Query<QueryParams>,
) -> std::result::Result<impl IntoResponse, ApiError> {
    let (question, limit) = validate(params)?;
    info!(limit, "question validée");

    let result = state
        .engine
        .query(&question, limit)
        .await
        .map_err(|e| ApiError::upstream(e, QUERY_FAILURE))?;

    Ok(Json(json!({
        "status": "success",
        "answer": result.answer,
        "standalone_query": result.standalone_query,
        "sources": result.sources,
    })))
}

/// Pure check: a request that fails here never reaches the engine.
fn validate(params: QueryParams) -> Result<(String, u32)> {
    let question = params
        .question
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| GatewayError::validation("La question est obligatoire."))?;

    let length = question.chars().count();
    if length < MIN_QUESTION_CHARS {
        return Err(GatewayError::validation(format!(
            "La question doit faire au moins {MIN_QUESTION_CHARS} caractères."
        )));
    }
    if length > MAX_QUESTION_CHARS {
        return Err(GatewayError::validation(format!(
            "La question ne doit pas dépasser {MAX_QUESTION_CHARS} caractères."
        )));
    }

    let limit = match params.limit.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        None => DEFAULT_LIMIT,
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|l| (MIN_LIMIT..=MAX_LIMIT).contains(l))
            .ok_or_else(|| {
                GatewayError::validation(format!(
                    "La limite doit être un entier entre {MIN_LIMIT} et {MAX_LIMIT}."
                ))
            })?,
    };

    Ok((question, limit))
}
