//! Canonical host redirect.

use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// When `server.fqdn` is set, requests addressed to any other host get a
/// `301` to the same path on the canonical host.
pub async fn canonical_host(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let fqdn = state.config.server.fqdn.as_str();
    if fqdn.is_empty() {
        return next.run(request).await;
    }

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();
    if host.eq_ignore_ascii_case(fqdn) {
        return next.run(request).await;
    }

    let target = format!("//{fqdn}{}", request.uri().path());
    match HeaderValue::try_from(target) {
        Ok(location) => {
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
        }
        Err(_) => next.run(request).await,
    }
}
