//! Route definitions.
//!
//! Listing routes live under `/api` and are matched before the link
//! dispatcher, which takes every remaining path.

use axum::Router;
use axum::routing::{any, get, post};

use crate::handlers::{health, link, list};
use crate::state::AppState;

/// Build the router with every route but no middleware.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .route("/", any(link::dispatch))
        .route("/{*name}", any(link::dispatch))
}

/// Listing and health endpoints. Unknown paths get a JSON 404.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/popular", get(list::popular))
        .route("/recent", get(list::recent))
        .route("/owned", get(list::owned))
        .route("/query", post(list::query))
        .route("/health", get(health::health))
        .fallback(list::not_found)
}
