//! Route handlers.

pub mod health;
pub mod link;
pub mod list;

/// Upper bound on every list response.
pub const LIST_LIMIT: usize = 10;
