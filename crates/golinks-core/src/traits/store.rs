//! The link directory contract every backend satisfies.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::Link;

/// Persistence contract for links.
///
/// Implementations exist for an in-process map, a JSON snapshot file, and
/// PostgreSQL. The dispatcher only ever sees `Arc<dyn LinkStore>`.
///
/// Names are compared case-insensitively everywhere. Only active links are
/// visible: a disabled link is excluded from every lookup and listing.
///
/// Cancellation is expressed by dropping the returned future. A dropped
/// mutation never leaves the backend's in-memory view ahead of durable
/// storage, though a write already handed to the OS or database may still
/// land.
///
/// # Errors
/// `NotFound` and `Conflict` are expected outcomes. Any operation may also
/// fail with a backend fault (`ServiceUnavailable`, `Storage`, `Database`,
/// `Serialization`), which callers surface as an internal error.
#[async_trait]
pub trait LinkStore: Send + Sync + std::fmt::Debug + 'static {
    /// Short backend name (`"memory"`, `"file"`, `"postgres"`).
    fn backend_name(&self) -> &'static str;

    /// Store a new link keyed by its lower-cased name and return the
    /// record as stored.
    ///
    /// Fails with `Conflict` if an active link of that name exists; a
    /// disabled record of that name is replaced. `created_at` and
    /// `updated_at` are set to now.
    async fn create_link(&self, link: Link) -> AppResult<Link>;

    /// The active link whose name matches, or `NotFound`.
    async fn get_link_by_name(&self, name: &str) -> AppResult<Link>;

    /// The first active link whose URL matches (case-insensitive), or
    /// `NotFound`.
    async fn get_link_by_url(&self, url: &str) -> AppResult<Link>;

    /// Mark an active link disabled and refresh `updated_at`.
    ///
    /// `NotFound` when no active link exists, so a repeated call is
    /// `NotFound`.
    async fn disable_link(&self, name: &str) -> AppResult<()>;

    /// Atomically add one view to an active link, or `NotFound`.
    async fn increment_link_views(&self, name: &str) -> AppResult<()>;

    /// Up to `size` active links by views, descending.
    async fn get_popular_links(&self, size: usize) -> AppResult<Vec<Link>>;

    /// Up to `size` active links by `updated_at`, descending.
    async fn get_recent_links(&self, size: usize) -> AppResult<Vec<Link>>;

    /// All active links created by `email` (case-insensitive).
    async fn get_owned_links(&self, email: &str) -> AppResult<Vec<Link>>;

    /// All active links whose name or description contains `query`
    /// (case-insensitive substring).
    async fn query_links(&self, query: &str) -> AppResult<Vec<Link>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Release backend resources. Idempotent.
    async fn close(&self) -> AppResult<()>;
}
