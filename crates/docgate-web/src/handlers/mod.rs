//! One handler module per gateway capability.

pub mod documents;
pub mod history;
pub mod ingest;
pub mod query;

use axum::Json;
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "docgate is running" }))
}
