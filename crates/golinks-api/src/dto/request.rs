//! Request DTOs with validation.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use validator::Validate;

use golinks_core::error::AppError;
use golinks_core::result::AppResult;
use golinks_core::NewLink;

/// Largest view count a new link may be seeded with.
pub const MAX_SEED_VIEWS: i64 = 1_000_000_000_000;

/// Body of `POST /{name}`.
///
/// Fields other than these (`name`, `created_by`, timestamps) are ignored:
/// the name comes from the path and the owner from the caller's identity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Redirect target.
    #[validate(length(min = 1, message = "url is required"))]
    pub url: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Initial view count.
    #[serde(default)]
    #[validate(range(min = 0, max = MAX_SEED_VIEWS, message = "views out of range"))]
    pub views: Option<i64>,
}

impl CreateLinkRequest {
    /// Decode and validate a raw request body.
    ///
    /// Any failure is reported as `Validation` with the message
    /// `"invalid payload"`.
    pub fn from_body(body: &[u8]) -> AppResult<NewLink> {
        let request: Self = serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "Undecodable link payload");
            AppError::validation("invalid payload")
        })?;
        if request.url.trim().is_empty() {
            return Err(AppError::validation("invalid payload"));
        }
        // The target is sent back verbatim as a Location header.
        if HeaderValue::try_from(request.url.as_str()).is_err() {
            tracing::debug!("Link target is not a valid header value");
            return Err(AppError::validation("invalid payload"));
        }
        request.validate().map_err(|e| {
            tracing::debug!(error = %e, "Rejected link payload");
            AppError::validation("invalid payload")
        })?;
        Ok(NewLink {
            url: request.url,
            description: request.description,
            views: request.views,
        })
    }
}

/// Body of `POST /api/query`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct QueryRequest {
    /// Case-insensitive substring matched against name and description.
    #[serde(default)]
    #[validate(length(max = 256, message = "query is too long"))]
    pub query: String,
}

impl QueryRequest {
    /// Decode and validate a raw request body.
    pub fn from_body(body: &[u8]) -> AppResult<Self> {
        let request: Self =
            serde_json::from_slice(body).map_err(|_| AppError::validation("bad request"))?;
        request
            .validate()
            .map_err(|_| AppError::validation("bad request"))?;
        Ok(request)
    }
}
