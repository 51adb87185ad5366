//! Maps `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use golinks_core::error::{AppError, ErrorKind};

use crate::dto::response::ErrorResponse;

/// Message returned for every server-side fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Status code for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `status` with `{"error": message}`, or no body when `message` is empty.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    if message.is_empty() {
        return status.into_response();
    }
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.kind.is_client_error() {
            let message = if err.kind == ErrorKind::Authorization {
                ""
            } else {
                err.message.as_str()
            };
            return error_response(status_for(err.kind), message);
        }

        tracing::error!(kind = %err.kind, error = %err, source = ?err.source, "Request failed");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

/// Wrapper that lets handlers return `AppError` with `?`.
///
/// Client-facing kinds keep their terse message. Authorization failures
/// carry no body. Every other kind is logged and rendered as a generic 500.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Handler result type.
pub type ApiResult<T> = Result<T, ApiError>;
