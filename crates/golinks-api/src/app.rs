//! Application builder and server runner.

use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;
use tracing::info;

use golinks_auth::IdentityResolver;
use golinks_core::config::AppConfig;
use golinks_core::error::{AppError, ErrorKind};
use golinks_core::result::AppResult;
use golinks_core::traits::store::LinkStore;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::host::canonical_host;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Wire routes, middleware, and state into an Axum app.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router()
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            canonical_host,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// Serve until Ctrl-C, then drain in-flight requests and return.
///
/// The caller owns `store` and is responsible for closing it afterwards.
pub async fn run_server(config: AppConfig, store: Arc<dyn LinkStore>) -> AppResult<()> {
    let identity = IdentityResolver::new(&config.auth)?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, store, identity);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Failed to bind {addr}"),
            e,
        )
    })?;

    info!(addr = %addr, "go-links server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    info!("go-links server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Shutdown signal received");
}
