//! Caller identity resolution.

use tracing::info;

use golinks_core::config::AuthConfig;
use golinks_core::error::AppError;
use golinks_core::result::AppResult;
use golinks_core::types::UNTRACKED_IDENTITY;

use crate::jwt::JwtDecoder;

/// Turns the session cookie (if any) into the caller's identity.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    mode: Mode,
}

#[derive(Debug, Clone)]
enum Mode {
    Untracked,
    Session {
        cookie_name: String,
        decoder: JwtDecoder,
    },
}

impl IdentityResolver {
    /// Build a resolver from configuration.
    ///
    /// With auth enabled, a missing or unreadable verification key fails
    /// here rather than on the first request.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        if !config.enabled {
            info!("Federated login not configured; callers are '{UNTRACKED_IDENTITY}'");
            return Ok(Self::untracked());
        }
        config.validate()?;
        let decoder = JwtDecoder::new(config)?;
        info!(cookie = %config.cookie_name, "Session token verification enabled");
        Ok(Self {
            mode: Mode::Session {
                cookie_name: config.cookie_name.clone(),
                decoder,
            },
        })
    }

    /// A resolver that answers `"untracked"` for everyone.
    pub fn untracked() -> Self {
        Self {
            mode: Mode::Untracked,
        }
    }

    /// Whether session tokens are being verified.
    pub fn is_enabled(&self) -> bool {
        matches!(self.mode, Mode::Session { .. })
    }

    /// Name of the session cookie, when verification is enabled.
    pub fn cookie_name(&self) -> Option<&str> {
        match &self.mode {
            Mode::Untracked => None,
            Mode::Session { cookie_name, .. } => Some(cookie_name),
        }
    }

    /// Resolve the caller from the session cookie value.
    ///
    /// # Errors
    /// `Authentication` when verification is enabled and the token is
    /// missing, empty, or fails verification.
    pub fn resolve(&self, token: Option<&str>) -> AppResult<String> {
        match &self.mode {
            Mode::Untracked => Ok(UNTRACKED_IDENTITY.to_string()),
            Mode::Session { decoder, .. } => {
                let token = token
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| AppError::authentication("missing authentication token"))?;
                decoder.decode(token).map(|claims| claims.sub)
            }
        }
    }
}
