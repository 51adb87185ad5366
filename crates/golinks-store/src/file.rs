//! JSON-file link store.
//!
//! The whole `name -> Link` map lives in memory behind a `RwLock` and is
//! rewritten to disk after every mutation. Writes go to `<path>.tmp` first
//! and are renamed over the target, so a crash never leaves a torn file.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use golinks_core::error::{AppError, ErrorKind};
use golinks_core::result::AppResult;
use golinks_core::traits::store::LinkStore;
use golinks_core::Link;

use crate::ranking;

type LinkMap = HashMap<String, Link>;

/// Link store persisted as a single JSON document.
#[derive(Debug)]
pub struct FileLinkStore {
    /// Location of the JSON document.
    path: PathBuf,
    /// In-memory copy of the document.
    links: RwLock<LinkMap>,
}

impl FileLinkStore {
    /// Open (or create) the store at `path`.
    ///
    /// A missing file starts an empty store and is written immediately; an
    /// empty file is treated as an empty store. Malformed JSON is a
    /// `Configuration` error.
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create link store directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let (links, existed) = match fs::read_to_string(&path).await {
            Ok(raw) => (parse_document(&raw, &path)?, true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (LinkMap::new(), false),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read link store: {}", path.display()),
                    e,
                ));
            }
        };

        let store = Self {
            path,
            links: RwLock::new(links),
        };
        if !existed {
            let links = store.links.read().await;
            store.persist(&links).await?;
        }

        let count = store.links.read().await.len();
        info!(path = %store.path.display(), links = count, "Opened file link store");
        Ok(store)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn persist(&self, links: &LinkMap) -> AppResult<()> {
        let ordered: BTreeMap<&String, &Link> = links.iter().collect();
        let body = serde_json::to_vec_pretty(&ordered)?;
        let tmp = self.temp_path();

        fs::write(&tmp, &body).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write link store: {}", tmp.display()),
                e,
            )
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace link store: {}", self.path.display()),
                e,
            )
        })?;

        debug!(path = %self.path.display(), bytes = body.len(), "Persisted link store");
        Ok(())
    }

    /// Apply `change` to a copy of the map under the write lock, persist the
    /// copy, and only then swap it in.
    ///
    /// If `change` fails, persisting fails, or the future is dropped while
    /// writing, the in-memory map is left untouched.
    async fn mutate<T>(&self, change: impl FnOnce(&mut LinkMap) -> AppResult<T>) -> AppResult<T> {
        let mut links = self.links.write().await;
        let mut staged = links.clone();
        let out = change(&mut staged)?;
        self.persist(&staged).await?;
        *links = staged;
        Ok(out)
    }

    async fn snapshot(&self) -> Vec<Link> {
        self.links.read().await.values().cloned().collect()
    }
}

fn parse_document(raw: &str, path: &Path) -> AppResult<LinkMap> {
    if raw.trim().is_empty() {
        return Ok(LinkMap::new());
    }
    let parsed: LinkMap = serde_json::from_str(raw).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Malformed link store file: {}", path.display()),
            e,
        )
    })?;
    Ok(parsed
        .into_iter()
        .map(|(key, mut link)| {
            let key = key.to_lowercase();
            link.name = key.clone();
            (key, link)
        })
        .collect())
}

#[async_trait]
impl LinkStore for FileLinkStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn create_link(&self, mut link: Link) -> AppResult<Link> {
        let key = link.name.to_lowercase();
        let now = Utc::now();
        link.name = key.clone();
        link.created_at = now;
        link.updated_at = now;
        link.disabled = false;

        self.mutate(move |links| {
            if links.get(&key).is_some_and(Link::is_active) {
                return Err(AppError::conflict("link already exists"));
            }
            links.insert(key, link.clone());
            Ok(link)
        })
        .await
    }

    async fn get_link_by_name(&self, name: &str) -> AppResult<Link> {
        self.links
            .read()
            .await
            .get(&name.to_lowercase())
            .filter(|link| link.is_active())
            .cloned()
            .ok_or_else(|| AppError::not_found("link not found"))
    }

    async fn get_link_by_url(&self, url: &str) -> AppResult<Link> {
        ranking::by_url(self.snapshot().await, url)
            .ok_or_else(|| AppError::not_found("link not found"))
    }

    async fn disable_link(&self, name: &str) -> AppResult<()> {
        let key = name.to_lowercase();
        self.mutate(|links| match links.get_mut(&key) {
            Some(link) if link.is_active() => {
                link.disabled = true;
                link.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(AppError::not_found("link not found")),
        })
        .await
    }

    async fn increment_link_views(&self, name: &str) -> AppResult<()> {
        let key = name.to_lowercase();
        self.mutate(|links| match links.get_mut(&key) {
            Some(link) if link.is_active() => {
                link.views = link.views.saturating_add(1);
                Ok(())
            }
            _ => Err(AppError::not_found("link not found")),
        })
        .await
    }

    async fn get_popular_links(&self, size: usize) -> AppResult<Vec<Link>> {
        Ok(ranking::popular(self.snapshot().await, size))
    }

    async fn get_recent_links(&self, size: usize) -> AppResult<Vec<Link>> {
        Ok(ranking::recent(self.snapshot().await, size))
    }

    async fn get_owned_links(&self, email: &str) -> AppResult<Vec<Link>> {
        Ok(ranking::owned(self.snapshot().await, email))
    }

    async fn query_links(&self, query: &str) -> AppResult<Vec<Link>> {
        Ok(ranking::query(self.snapshot().await, query))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::try_exists(&self.path).await.unwrap_or(false))
    }

    async fn close(&self) -> AppResult<()> {
        debug!(path = %self.path.display(), "Closed file link store");
        Ok(())
    }
}
