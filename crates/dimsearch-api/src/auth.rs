//! Identity capability check for the index management endpoints.

use crate::api::SearchApi;
use crate::handlers::NOT_FOUND_BODY;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::warn;

/// Header carrying the internal identity credential.
pub const IDENTITY_HEADER: &str = "internal-token";

/// Decide whether the request carries a valid identity. Fails closed when
/// no token is configured.
pub fn identify(headers: &HeaderMap, expected: &str) -> bool {
    !expected.is_empty()
        && headers
            .get(IDENTITY_HEADER)
            .and_then(|value| value.to_str().ok())
            == Some(expected)
}

/// Middleware guarding the private routes. Failed identity answers with the
/// same 404 as a missing index, so callers cannot probe which endpoints
/// exist.
pub async fn require_identity(
    State(api): State<Arc<SearchApi>>,
    request: Request,
    next: Next,
) -> Response {
    if identify(request.headers(), &api.service_auth_token) {
        next.run(request).await
    } else {
        warn!(path = %request.uri().path(), "identity check failed on private endpoint");
        (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
    }
}
