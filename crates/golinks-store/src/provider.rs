//! Store manager that dispatches to the configured backend.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use golinks_core::config::database::DatabaseConfig;
use golinks_core::config::store::{StoreBackend, StoreConfig};
use golinks_core::result::AppResult;
use golinks_core::traits::store::LinkStore;
use golinks_core::Link;

/// Link store that wraps the configured backend.
///
/// The backend is selected once at construction time; handlers only ever
/// see it through `Arc<dyn LinkStore>`.
#[derive(Debug, Clone)]
pub struct LinkStoreManager {
    /// The inner backend.
    inner: Arc<dyn LinkStore>,
}

impl LinkStoreManager {
    /// Build the backend named by `config.backend`.
    pub async fn new(config: &StoreConfig, database: &DatabaseConfig) -> AppResult<Self> {
        let inner: Arc<dyn LinkStore> = match config.backend {
            StoreBackend::Memory => {
                info!("Initializing in-memory link store");
                Arc::new(crate::memory::MemoryLinkStore::new())
            }
            StoreBackend::File => {
                info!(path = %config.file.path, "Initializing file link store");
                Arc::new(crate::file::FileLinkStore::open(&config.file.path).await?)
            }
            #[cfg(feature = "postgres")]
            StoreBackend::Postgres => {
                info!("Initializing PostgreSQL link store");
                let pool = golinks_database::DatabasePool::connect(database).await?;
                golinks_database::run_migrations(pool.pool()).await?;
                Arc::new(golinks_database::PgLinkStore::new(pool))
            }
            #[cfg(not(feature = "postgres"))]
            StoreBackend::Postgres => {
                let _ = database;
                return Err(golinks_core::AppError::configuration(
                    "Store backend 'postgres' requires the 'postgres' feature",
                ));
            }
        };

        Ok(Self { inner })
    }

    /// Shared handle to the inner backend.
    pub fn store(&self) -> Arc<dyn LinkStore> {
        Arc::clone(&self.inner)
    }
}

#[async_trait]
impl LinkStore for LinkStoreManager {
    fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }

    async fn create_link(&self, link: Link) -> AppResult<Link> {
        self.inner.create_link(link).await
    }

    async fn get_link_by_name(&self, name: &str) -> AppResult<Link> {
        self.inner.get_link_by_name(name).await
    }

    async fn get_link_by_url(&self, url: &str) -> AppResult<Link> {
        self.inner.get_link_by_url(url).await
    }

    async fn disable_link(&self, name: &str) -> AppResult<()> {
        self.inner.disable_link(name).await
    }

    async fn increment_link_views(&self, name: &str) -> AppResult<()> {
        self.inner.increment_link_views(name).await
    }

    async fn get_popular_links(&self, size: usize) -> AppResult<Vec<Link>> {
        self.inner.get_popular_links(size).await
    }

    async fn get_recent_links(&self, size: usize) -> AppResult<Vec<Link>> {
        self.inner.get_recent_links(size).await
    }

    async fn get_owned_links(&self, email: &str) -> AppResult<Vec<Link>> {
        self.inner.get_owned_links(email).await
    }

    async fn query_links(&self, query: &str) -> AppResult<Vec<Link>> {
        self.inner.query_links(query).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn close(&self) -> AppResult<()> {
        self.inner.close().await
    }
}
