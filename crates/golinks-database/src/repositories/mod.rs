//! Repository implementations backed by PostgreSQL.

pub mod link;

pub use link::PgLinkStore;
