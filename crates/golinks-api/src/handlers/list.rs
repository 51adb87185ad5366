//! Listing routes under `/api`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use golinks_core::Link;

use super::LIST_LIMIT;
use crate::dto::request::QueryRequest;
use crate::error::{ApiResult, error_response};
use crate::extractors::CallerIdentity;
use crate::state::AppState;

/// GET /api/popular
pub async fn popular(State(state): State<AppState>) -> ApiResult<Json<Vec<Link>>> {
    Ok(Json(state.store.get_popular_links(LIST_LIMIT).await?))
}

/// GET /api/recent
pub async fn recent(State(state): State<AppState>) -> ApiResult<Json<Vec<Link>>> {
    Ok(Json(state.store.get_recent_links(LIST_LIMIT).await?))
}

/// GET /api/owned
pub async fn owned(
    State(state): State<AppState>,
    identity: CallerIdentity,
) -> ApiResult<Json<Vec<Link>>> {
    let mut links = state.store.get_owned_links(identity.as_str()).await?;
    links.truncate(LIST_LIMIT);
    Ok(Json(links))
}

/// POST /api/query
pub async fn query(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Vec<Link>>> {
    let request = QueryRequest::from_body(&body)?;
    let mut links = state.store.query_links(&request.query).await?;
    links.truncate(LIST_LIMIT);
    Ok(Json(links))
}

/// Any other `/api/...` path.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "not found")
}
