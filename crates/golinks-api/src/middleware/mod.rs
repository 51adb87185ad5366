//! Axum middleware stack.

pub mod cors;
pub mod host;
pub mod logging;
