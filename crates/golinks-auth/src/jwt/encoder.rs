//! Session token issuance.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use golinks_core::config::AuthConfig;
use golinks_core::error::AppError;
use golinks_core::result::AppResult;

use super::claims::SessionClaims;

/// Signs HS256 session tokens with the shared secret.
///
/// The server never issues tokens itself; the login handshake that sets the
/// cookie lives outside this service. This signs session cookies for tests.
#[derive(Debug, Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl_minutes: i64,
    issuer: Option<String>,
    audience: Option<String>,
}

impl JwtEncoder {
    /// Build an encoder from auth configuration. Requires `jwt_secret`.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        if config.jwt_secret.is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret is required to issue session tokens",
            ));
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_minutes: i64::try_from(config.token_ttl_minutes).unwrap_or(i64::MAX),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        })
    }

    /// Issue a token for `email` that expires after the configured TTL.
    pub fn issue(&self, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let exp = Duration::try_minutes(self.ttl_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(now);
        self.encode_claims(&SessionClaims {
            sub: email.to_string(),
            exp: Some(exp.timestamp()),
            iat: Some(now.timestamp()),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        })
    }

    /// Sign arbitrary claims.
    pub fn encode_claims(&self, claims: &SessionClaims) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
    }
}
