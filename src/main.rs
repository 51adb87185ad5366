//! go-links server
//!
//! Main entry point that loads configuration, builds the configured link
//! store, and serves the HTTP API until shutdown.

use tracing_subscriber::{EnvFilter, fmt};

use golinks_core::config::AppConfig;
use golinks_core::error::AppError;
use golinks_core::traits::store::LinkStore;
use golinks_store::LinkStoreManager;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment, then validate it.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("GOLINKS_ENV").unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env)?;
    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.store.backend,
        "Starting go-links"
    );

    let manager = LinkStoreManager::new(&config.store, &config.database).await?;
    tracing::info!(backend = manager.backend_name(), "Link store ready");

    let served = golinks_api::run_server(config, manager.store()).await;

    // Close even when serving failed, but report the serve error first.
    if let Err(e) = manager.close().await {
        tracing::warn!(error = %e, "Failed to close link store");
    }
    served?;

    tracing::info!("go-links shut down gracefully");
    Ok(())
}
