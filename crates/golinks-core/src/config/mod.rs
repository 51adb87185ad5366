//! Application configuration schemas.
//!
//! Configuration is layered with the `config` crate: an optional
//! `config/default.toml`, an optional environment overlay, and
//! environment variables prefixed with `GOLINKS__`. Every field has a
//! default, so an empty configuration starts an in-memory server with
//! authentication disabled.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::store::{FileStoreConfig, StoreBackend, StoreConfig};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Link store backend selection.
    #[serde(default)]
    pub store: StoreConfig,
    /// PostgreSQL settings (used by the `postgres` backend only).
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Federated-login session token settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default.toml` with `config/{env}.toml` and
    /// environment variables such as `GOLINKS__STORE__BACKEND=file`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("GOLINKS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        self.auth.validate()?;
        if self.store.backend == StoreBackend::File && self.store.file.path.trim().is_empty() {
            return Err(AppError::configuration(
                "store.file.path must be set for the file backend",
            ));
        }
        if self.store.backend == StoreBackend::Postgres && self.database.url.trim().is_empty() {
            return Err(AppError::configuration(
                "database.url must be set for the postgres backend",
            ));
        }
        Ok(())
    }
}
