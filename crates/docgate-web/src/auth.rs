//! Bearer-token guard for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::typed_header::TypedHeaderRejection;
use axum_extra::TypedHeader;
use secrecy::ExposeSecret;

use docgate_common::GatewayError;

use crate::error::ApiError;
use crate::state::SharedState;

/// Missing credential is 401, wrong credential is 403. A header that is
/// present but not a bearer scheme carries no usable credential either, so it
/// gets the same 401 envelope as an absent one. The check is a plain
/// comparison against the configured shared secret; there is no token issuing
/// or expiry on the gateway side.
pub async fn require_bearer(
    State(state): State<SharedState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) =
        bearer.map_err(|_| ApiError::from(GatewayError::MissingToken))?;
    if bearer.token() != state.config.bearer_secret.expose_secret() {
        return Err(GatewayError::InvalidToken.into());
    }
    Ok(next.run(request).await)
}
