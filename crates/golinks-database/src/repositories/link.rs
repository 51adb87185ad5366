//! PostgreSQL link store.

use async_trait::async_trait;
use tracing::info;

use golinks_core::error::{AppError, ErrorKind};
use golinks_core::result::AppResult;
use golinks_core::traits::store::LinkStore;
use golinks_core::Link;

use crate::connection::DatabasePool;

const LINK_COLUMNS: &str =
    "name, description, url, views, created_at, updated_at, created_by, disabled";

/// Link store backed by the `links` table.
///
/// Uniqueness among active links is enforced by the primary key plus a
/// conditional upsert: a disabled row with the same name is overwritten,
/// an active one makes the insert return no row.
#[derive(Debug, Clone)]
pub struct PgLinkStore {
    db: DatabasePool,
}

impl PgLinkStore {
    /// Create a store over an open pool.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }

    async fn fetch_list(&self, sql: &str, bind: ListBind<'_>) -> AppResult<Vec<Link>> {
        let query = sqlx::query_as::<_, Link>(sql);
        let query = match bind {
            ListBind::Limit(size) => query.bind(limit(size)),
            ListBind::Text(text) => query.bind(text.to_string()),
        };
        query
            .fetch_all(self.db.pool())
            .await
            .map_err(db_error("Failed to list links"))
    }
}

enum ListBind<'a> {
    Limit(usize),
    Text(&'a str),
}

#[async_trait]
impl LinkStore for PgLinkStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn create_link(&self, link: Link) -> AppResult<Link> {
        let sql = format!(
            "INSERT INTO links (name, description, url, views, created_at, updated_at, created_by, disabled) \
             VALUES (LOWER($1), $2, $3, $4, NOW(), NOW(), $5, FALSE) \
             ON CONFLICT (name) DO UPDATE SET \
                 description = EXCLUDED.description, \
                 url = EXCLUDED.url, \
                 views = EXCLUDED.views, \
                 created_at = EXCLUDED.created_at, \
                 updated_at = EXCLUDED.updated_at, \
                 created_by = EXCLUDED.created_by, \
                 disabled = FALSE \
             WHERE links.disabled \
             RETURNING {LINK_COLUMNS}"
        );
        sqlx::query_as::<_, Link>(&sql)
            .bind(&link.name)
            .bind(&link.description)
            .bind(&link.url)
            .bind(link.views)
            .bind(&link.created_by)
            .fetch_optional(self.db.pool())
            .await
            .map_err(db_error("Failed to create link"))?
            .ok_or_else(|| AppError::conflict("link already exists"))
    }

    async fn get_link_by_name(&self, name: &str) -> AppResult<Link> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE name = LOWER($1) AND NOT disabled");
        sqlx::query_as::<_, Link>(&sql)
            .bind(name)
            .fetch_optional(self.db.pool())
            .await
            .map_err(db_error("Failed to find link"))?
            .ok_or_else(|| AppError::not_found("link not found"))
    }

    async fn get_link_by_url(&self, url: &str) -> AppResult<Link> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE LOWER(url) = LOWER($1) AND NOT disabled \
             ORDER BY name LIMIT 1"
        );
        sqlx::query_as::<_, Link>(&sql)
            .bind(url)
            .fetch_optional(self.db.pool())
            .await
            .map_err(db_error("Failed to find link by url"))?
            .ok_or_else(|| AppError::not_found("link not found"))
    }

    async fn disable_link(&self, name: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE links SET disabled = TRUE, updated_at = NOW() \
             WHERE name = LOWER($1) AND NOT disabled",
        )
        .bind(name)
        .execute(self.db.pool())
        .await
        .map_err(db_error("Failed to disable link"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("link not found"));
        }
        Ok(())
    }

    async fn increment_link_views(&self, name: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE links \
             SET views = CASE WHEN views < 9223372036854775807 THEN views + 1 ELSE views END \
             WHERE name = LOWER($1) AND NOT disabled",
        )
        .bind(name)
        .execute(self.db.pool())
        .await
        .map_err(db_error("Failed to increment link views"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("link not found"));
        }
        Ok(())
    }

    async fn get_popular_links(&self, size: usize) -> AppResult<Vec<Link>> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE NOT disabled \
             ORDER BY views DESC, name LIMIT $1"
        );
        self.fetch_list(&sql, ListBind::Limit(size)).await
    }

    async fn get_recent_links(&self, size: usize) -> AppResult<Vec<Link>> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE NOT disabled \
             ORDER BY updated_at DESC, name LIMIT $1"
        );
        self.fetch_list(&sql, ListBind::Limit(size)).await
    }

    async fn get_owned_links(&self, email: &str) -> AppResult<Vec<Link>> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE LOWER(created_by) = LOWER($1) AND NOT disabled \
             ORDER BY updated_at DESC, name"
        );
        self.fetch_list(&sql, ListBind::Text(email)).await
    }

    async fn query_links(&self, query: &str) -> AppResult<Vec<Link>> {
        let pattern = format!("%{}%", escape_like(query));
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE NOT disabled \
               AND (name ILIKE $1 ESCAPE '\\' OR description ILIKE $1 ESCAPE '\\') \
             ORDER BY views DESC, name"
        );
        self.fetch_list(&sql, ListBind::Text(&pattern)).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.db.health_check().await
    }

    async fn close(&self) -> AppResult<()> {
        self.db.close().await;
        info!("PostgreSQL link store closed");
        Ok(())
    }
}

/// Escape `%`, `_` and the escape character itself for use in `ILIKE`.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn limit(size: usize) -> i64 {
    i64::try_from(size).unwrap_or(i64::MAX)
}

/// Map a sqlx failure to an application error. Connectivity problems
/// become `ServiceUnavailable`; everything else is `Database`.
fn db_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        let kind = match &e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                ErrorKind::ServiceUnavailable
            }
            _ => ErrorKind::Database,
        };
        AppError::with_source(kind, message, e)
    }
}
