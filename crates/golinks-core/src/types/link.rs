//! The link entity and its create payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::name::LinkName;

/// Identity recorded for callers when federated login is not configured.
pub const UNTRACKED_IDENTITY: &str = "untracked";

/// A named redirect record with usage metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Link {
    /// Normalized, lower-cased short name. Unique among active links.
    pub name: String,
    /// Free-text description, searchable.
    #[serde(default)]
    pub description: String,
    /// Redirect target.
    pub url: String,
    /// Number of successful resolutions.
    #[serde(default)]
    pub views: i64,
    /// Set once by the store at creation.
    pub created_at: DateTime<Utc>,
    /// Set at creation; refreshed on disable.
    pub updated_at: DateTime<Utc>,
    /// Caller identity at creation time.
    #[serde(default)]
    pub created_by: String,
    /// Soft-delete flag. Disabled links are invisible to every query.
    #[serde(default)]
    pub disabled: bool,
}

impl Link {
    /// Build a link from a validated name, the caller's payload, and the
    /// caller's identity. Timestamps are provisional; the store stamps them.
    pub fn new(name: LinkName, payload: NewLink, created_by: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into_inner(),
            description: payload.description,
            url: payload.url,
            views: payload.views.unwrap_or(0),
            created_at: now,
            updated_at: now,
            created_by: created_by.into(),
            disabled: false,
        }
    }

    /// Whether the link is visible to lookups and listings.
    pub fn is_active(&self) -> bool {
        !self.disabled
    }

    /// Case-insensitive substring match on name or description.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// Whether `email` owns this link (case-insensitive).
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.created_by.eq_ignore_ascii_case(email)
    }
}

/// Body of a create request: `{url, description, views?}`.
///
/// Other fields a client may send (`name`, `created_at`, ...) are ignored;
/// the name comes from the request path and the owner from the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLink {
    /// Redirect target.
    pub url: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Optional initial view count.
    #[serde(default)]
    pub views: Option<i64>,
}
