//! In-memory link store backed by dashmap.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use golinks_core::result::AppResult;
use golinks_core::traits::store::LinkStore;
use golinks_core::{AppError, Link};

use crate::ranking;

/// Process-local link store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    /// Links keyed by lower-cased name, disabled records included.
    links: DashMap<String, Link>,
}

impl MemoryLinkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self) -> Vec<Link> {
        self.links.iter().map(|entry| entry.value().clone()).collect()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create_link(&self, mut link: Link) -> AppResult<Link> {
        let key = link.name.to_lowercase();
        let now = Utc::now();
        link.name = key.clone();
        link.created_at = now;
        link.updated_at = now;
        link.disabled = false;

        match self.links.entry(key) {
            Entry::Occupied(mut existing) => {
                if existing.get().is_active() {
                    return Err(AppError::conflict("link already exists"));
                }
                debug!(name = %link.name, "Replacing disabled link");
                existing.insert(link.clone());
            }
            Entry::Vacant(slot) => {
                slot.insert(link.clone());
            }
        }
        Ok(link)
    }

    async fn get_link_by_name(&self, name: &str) -> AppResult<Link> {
        self.links
            .get(&name.to_lowercase())
            .map(|entry| entry.value().clone())
            .filter(Link::is_active)
            .ok_or_else(|| AppError::not_found("link not found"))
    }

    async fn get_link_by_url(&self, url: &str) -> AppResult<Link> {
        ranking::by_url(self.snapshot(), url).ok_or_else(|| AppError::not_found("link not found"))
    }

    async fn disable_link(&self, name: &str) -> AppResult<()> {
        match self.links.get_mut(&name.to_lowercase()) {
            Some(mut entry) if entry.is_active() => {
                entry.disabled = true;
                entry.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(AppError::not_found("link not found")),
        }
    }

    async fn increment_link_views(&self, name: &str) -> AppResult<()> {
        match self.links.get_mut(&name.to_lowercase()) {
            Some(mut entry) if entry.is_active() => {
                entry.views = entry.views.saturating_add(1);
                Ok(())
            }
            _ => Err(AppError::not_found("link not found")),
        }
    }

    async fn get_popular_links(&self, size: usize) -> AppResult<Vec<Link>> {
        Ok(ranking::popular(self.snapshot(), size))
    }

    async fn get_recent_links(&self, size: usize) -> AppResult<Vec<Link>> {
        Ok(ranking::recent(self.snapshot(), size))
    }

    async fn get_owned_links(&self, email: &str) -> AppResult<Vec<Link>> {
        Ok(ranking::owned(self.snapshot(), email))
    }

    async fn query_links(&self, query: &str) -> AppResult<Vec<Link>> {
        Ok(ranking::query(self.snapshot(), query))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn close(&self) -> AppResult<()> {
        Ok(())
    }
}
