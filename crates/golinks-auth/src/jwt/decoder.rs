//! Session token verification.

use std::path::Path;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use golinks_core::config::AuthConfig;
use golinks_core::error::{AppError, ErrorKind};
use golinks_core::result::AppResult;

use super::claims::SessionClaims;

/// Verifies session tokens against the configured key.
///
/// The signature is always checked. `exp` is enforced when present, with
/// five seconds of leeway; `iss` and `aud` are required only when the
/// configuration names them.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Build a decoder from auth configuration.
    ///
    /// `public_key_path` (RS256) wins over `jwt_secret` (HS256). Having
    /// neither is a `Configuration` error.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let (decoding_key, algorithm) = if !config.public_key_path.is_empty() {
            (load_rsa_key(Path::new(&config.public_key_path))?, Algorithm::RS256)
        } else if !config.jwt_secret.is_empty() {
            (
                DecodingKey::from_secret(config.jwt_secret.as_bytes()),
                Algorithm::HS256,
            )
        } else {
            return Err(AppError::configuration(
                "no session token verification key configured",
            ));
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.leeway = 5;
        validation.required_spec_claims.clear();

        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
            validation.required_spec_claims.insert("iss".to_string());
        }
        match &config.audience {
            Some(audience) => {
                validation.set_audience(&[audience]);
                validation.required_spec_claims.insert("aud".to_string());
            }
            None => validation.validate_aud = false,
        }

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify `token` and return its claims.
    pub fn decode(&self, token: &str) -> AppResult<SessionClaims> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| {
                debug!(error = %e, "Rejected session token");
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("session token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("invalid session token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer
                    | jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                        AppError::authentication("session token was not issued for this service")
                    }
                    _ => AppError::authentication("invalid session token"),
                }
            },
        )?;

        if data.claims.sub.trim().is_empty() {
            return Err(AppError::authentication("session token has no subject"));
        }
        Ok(data.claims)
    }
}

fn load_rsa_key(path: &Path) -> AppResult<DecodingKey> {
    let pem = std::fs::read(path).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Failed to read public key: {}", path.display()),
            e,
        )
    })?;
    DecodingKey::from_rsa_pem(&pem).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Invalid RSA public key: {}", path.display()),
            e,
        )
    })
}
