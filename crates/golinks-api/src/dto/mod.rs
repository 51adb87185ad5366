//! Request and response bodies.

pub mod request;
pub mod response;

pub use request::{CreateLinkRequest, QueryRequest};
pub use response::{ErrorResponse, HealthResponse};
