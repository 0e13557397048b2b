//! PDF upload relay: buffer, validate, re-encode as one outbound batch.

use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::info;

use docgate_common::error::GatewayError;
use docgate_common::types::{PdfPayload, DEFAULT_CONFIG_ID};

use crate::error::ApiError;
use crate::state::SharedState;

pub const INGEST_FAILURE: &str =
    "Erreur lors de la communication avec le moteur d'ingestion PDF.";

const PDF_MIME: &str = "application/pdf";

/// POST /api/ingest — accept one or many PDFs plus an optional `config_id`
/// and forward them to the engine as a single atomic batch. Any non-PDF file
/// rejects the whole batch before anything leaves the gateway.
pub async fn ingest_pdfs(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut files: Vec<PdfPayload> = Vec::new();
    let mut config_id: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(unreadable_body)? {
        // `file` is the legacy single-upload field name; both land in the
        // same bulk batch.
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "files" | "file" => {
                let filename = field.file_name().unwrap_or("document.pdf").to_string();
                let mime_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(unreadable_body)?;
                files.push(PdfPayload { filename, mime_type, bytes: bytes.to_vec() });
            }
            "config_id" => {
                config_id = Some(field.text().await.map_err(unreadable_body)?);
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(GatewayError::validation("Aucun fichier PDF fourni.").into());
    }

    let invalid: Vec<String> = files
        .iter()
        .filter(|f| f.mime_type != PDF_MIME)
        .map(|f| f.filename.clone())
        .collect();
    if !invalid.is_empty() {
        return Err(GatewayError::Validation {
            message: "Certains fichiers ne sont pas des PDFs.".to_string(),
            invalid: Some(invalid),
        }
        .into());
    }

    let count = files.len();
    let config_id = config_id
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_ID.to_string());
    info!(count, %config_id, "batch PDF validé");

    let data = state
        .engine
        .ingest_bulk(files, &config_id)
        .await
        .map_err(|e| ApiError::upstream(e, INGEST_FAILURE))?;

    Ok(Json(json!({
        "status": "success",
        "message": format!("{count} PDF(s) traité(s), indexé(s) et digéré(s)."),
        "data": data,
    })))
}

fn unreadable_body(err: axum::extract::multipart::MultipartError) -> ApiError {
    GatewayError::validation(format!("Corps multipart illisible: {err}")).into()
}
