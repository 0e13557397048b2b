//! Axum router — binds paths to relays, with the bearer guard and the fixed
//! middleware stack (CORS, body limit, request tracing).

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::auth::require_bearer;
use crate::handlers::{
    documents::list_documents, health, history::reset_history, ingest::ingest_pdfs,
    query::ask_question,
};
use crate::state::{AppState, SharedState};

/// Build and return the full gateway router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    let mut protected = Router::new()
        .route("/api/query", get(ask_question))
        .route("/api/ingest", post(ingest_pdfs))
        .route("/api/documents", get(list_documents));

    // The history reset shipped unguarded in the original gateway; the
    // policy switch lets a deployment close it without a code change.
    let mut open = Router::new().route("/health", get(health));
    let history = Router::new().route("/api/clear-history", post(reset_history));
    if shared.config.protect_clear_history {
        protected = protected.merge(history);
    } else {
        open = open.merge(history);
    }

    let protected =
        protected.route_layer(middleware::from_fn_with_state(shared.clone(), require_bearer));

    Router::new()
        .merge(open)
        .merge(protected)
        .layer(DefaultBodyLimit::max(shared.config.max_upload_bytes))
        .layer(cors_layer(shared.config.allowed_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    match allowed_origin.map(|o| (o, o.parse::<HeaderValue>())) {
        Some((_, Ok(origin))) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Some((raw, Err(_))) => {
            warn!(origin = raw, "ALLOWED_ORIGIN is not a valid header value, CORS stays permissive");
            CorsLayer::permissive()
        }
        None => CorsLayer::permissive(),
    }
}
