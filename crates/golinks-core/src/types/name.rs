//! Link name normalization and validation.

use std::fmt;

use crate::error::AppError;

/// Names that collide with asset-serving and listing routes.
const RESERVED_EXACT: &[&str] = &["static", "api/popular", "api/recent"];
const RESERVED_PREFIX: &str = "static/";

/// A validated, lower-cased link name.
///
/// This is the only form a name takes once it leaves the request path:
/// stores key on it and responses echo it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkName(String);

impl LinkName {
    /// Normalize a raw path segment.
    ///
    /// Strips one leading and one trailing `/`, rejects empty input,
    /// names starting or ending with `-`, and characters outside
    /// `[A-Za-z0-9/-]`, then lower-cases.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if raw.is_empty() {
            return Err(AppError::validation("link is empty"));
        }
        let trimmed = raw.strip_prefix('/').unwrap_or(raw);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(AppError::validation("link is empty"));
        }
        if trimmed.starts_with('-') || trimmed.ends_with('-') {
            return Err(AppError::validation("name input is invalid"));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '/' || c == '-')
        {
            return Err(AppError::validation("name input is invalid"));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Whether this name is shadowed by a built-in route.
    pub fn is_reserved(&self) -> bool {
        RESERVED_EXACT.contains(&self.0.as_str()) || self.0.starts_with(RESERVED_PREFIX)
    }

    /// The normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the normalized string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for LinkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LinkName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
