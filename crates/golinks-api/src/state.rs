//! Shared application state passed to every handler.

use std::sync::Arc;

use golinks_auth::IdentityResolver;
use golinks_core::config::AppConfig;
use golinks_core::traits::store::LinkStore;

/// State cloned into every request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// The configured link store backend.
    pub store: Arc<dyn LinkStore>,
    /// Caller identity resolution.
    pub identity: Arc<IdentityResolver>,
}

impl AppState {
    /// Assemble state from its parts.
    pub fn new(config: AppConfig, store: Arc<dyn LinkStore>, identity: IdentityResolver) -> Self {
        Self {
            config: Arc::new(config),
            store,
            identity: Arc::new(identity),
        }
    }

    /// Where unknown links are sent.
    pub fn home_location(&self) -> String {
        self.config.server.home_location()
    }
}
