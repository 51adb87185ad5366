//! # golinks-api
//!
//! HTTP layer for go-links built on Axum.
//!
//! Listing routes under `/api` are matched first; every other path is a
//! link name handled by the dispatcher in [`handlers::link`].

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
