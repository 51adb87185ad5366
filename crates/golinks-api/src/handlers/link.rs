//! The link dispatcher: every path that is not an `/api` route.
//!
//! The path is validated and normalized first, then checked against the
//! reserved names, and only then dispatched on the method.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, error, info, warn};

use golinks_core::{Link, LinkName};

use crate::dto::request::CreateLinkRequest;
use crate::error::{ApiError, INTERNAL_ERROR_MESSAGE, error_response};
use crate::extractors::resolve_identity;
use crate::state::AppState;

/// `ANY /` and `ANY /{*name}`.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    jar: CookieJar,
    body: Bytes,
) -> Response {
    let name = match LinkName::parse(uri.path()) {
        Ok(name) => name,
        Err(e) => return ApiError(e).into_response(),
    };
    if name.is_reserved() {
        debug!(name = %name, "Rejected reserved link name");
        return StatusCode::FORBIDDEN.into_response();
    }

    match method {
        Method::GET => follow(&state, &name).await,
        Method::POST => create(&state, name, &jar, &body).await,
        Method::DELETE => disable(&state, &name).await,
        Method::OPTIONS => StatusCode::OK.into_response(),
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

/// Redirect to the link target, counting the view.
///
/// Unknown links (and lookup failures) send the caller home instead.
async fn follow(state: &AppState, name: &LinkName) -> Response {
    let link = match state.store.get_link_by_name(name.as_str()).await {
        Ok(link) => link,
        Err(e) => {
            if !e.is_not_found() {
                error!(name = %name, error = %e, "Link lookup failed");
            }
            return Redirect::temporary(&state.home_location()).into_response();
        }
    };

    if let Err(e) = state.store.increment_link_views(&link.name).await {
        warn!(name = %link.name, error = %e, "Failed to count link view");
    }

    found(&link.url)
}

async fn create(state: &AppState, name: LinkName, jar: &CookieJar, body: &[u8]) -> Response {
    let identity = match resolve_identity(state, jar) {
        Ok(identity) => identity,
        Err(e) => return ApiError(e).into_response(),
    };
    let payload = match CreateLinkRequest::from_body(body) {
        Ok(payload) => payload,
        Err(e) => return ApiError(e).into_response(),
    };

    let link = Link::new(name, payload, identity.0);
    match state.store.create_link(link).await {
        Ok(stored) => {
            info!(name = %stored.name, created_by = %stored.created_by, "Created link");
            (StatusCode::CREATED, Json(stored)).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// Soft-delete. Every failure, including an unknown name, is a 500.
async fn disable(state: &AppState, name: &LinkName) -> Response {
    match state.store.disable_link(name.as_str()).await {
        Ok(()) => {
            info!(name = %name, "Disabled link");
            StatusCode::ACCEPTED.into_response()
        }
        Err(e) => {
            error!(name = %name, error = %e, "Failed to disable link");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}

/// `302 Found` to `url`.
fn found(url: &str) -> Response {
    match HeaderValue::try_from(url) {
        Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        Err(e) => {
            error!(url, error = %e, "Stored link target is not a valid Location header");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}
