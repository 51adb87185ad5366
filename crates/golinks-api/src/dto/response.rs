//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Error body: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Terse, client-safe message.
    pub error: String,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"unavailable"`.
    pub status: String,
    /// Name of the active store backend.
    pub backend: String,
    /// Server version.
    pub version: String,
}
