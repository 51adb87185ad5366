//! `CallerIdentity` extractor: resolves the caller from the session cookie.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use golinks_core::error::AppError;
use golinks_core::result::AppResult;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller's email, or `"untracked"` when login is not configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(pub String);

impl CallerIdentity {
    /// The identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for CallerIdentity {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Resolve the caller from the request cookies.
///
/// Every verification failure collapses into the same `Authentication`
/// error; the specific reason is only logged.
pub fn resolve_identity(state: &AppState, jar: &CookieJar) -> AppResult<CallerIdentity> {
    let token = state
        .identity
        .cookie_name()
        .and_then(|name| jar.get(name))
        .map(|cookie| cookie.value().to_string());

    state
        .identity
        .resolve(token.as_deref())
        .map(CallerIdentity)
        .map_err(|e| {
            debug!(reason = %e.message, "Caller could not be identified");
            AppError::authentication("missing authentication token")
        })
}

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(resolve_identity(state, &jar)?)
    }
}
