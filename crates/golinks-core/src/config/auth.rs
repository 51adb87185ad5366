//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Federated-login session token configuration.
///
/// The login handshake itself happens elsewhere; this service only
/// verifies the signed session token it leaves in a cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Whether federated login is configured. When `false`, every caller
    /// is the anonymous `"untracked"` identity.
    #[serde(default)]
    pub enabled: bool,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// HMAC-SHA256 shared secret used to verify session tokens.
    #[serde(default)]
    pub jwt_secret: String,
    /// Path to a PEM RSA public key used to verify RS256 session tokens.
    /// Takes precedence over `jwt_secret` when set.
    #[serde(default)]
    pub public_key_path: String,
    /// Required `iss` claim, if any.
    #[serde(default)]
    pub issuer: Option<String>,
    /// Required `aud` claim, if any.
    #[serde(default)]
    pub audience: Option<String>,
    /// Lifetime of tokens signed by `JwtEncoder`, in minutes. Only test
    /// cookies are signed in-process.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cookie_name: default_cookie_name(),
            jwt_secret: String::new(),
            public_key_path: String::new(),
            issuer: None,
            audience: None,
            token_ttl_minutes: default_token_ttl(),
        }
    }
}

impl AuthConfig {
    /// Enabled authentication must name a verification key.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.enabled && self.jwt_secret.is_empty() && self.public_key_path.is_empty() {
            return Err(AppError::configuration(
                "auth is enabled but neither auth.jwt_secret nor auth.public_key_path is set",
            ));
        }
        if self.enabled && self.cookie_name.trim().is_empty() {
            return Err(AppError::configuration("auth.cookie_name must not be empty"));
        }
        Ok(())
    }
}

fn default_cookie_name() -> String {
    "token".to_string()
}

fn default_token_ttl() -> u64 {
    60 * 24
}
