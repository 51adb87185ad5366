//! # golinks-database
//!
//! PostgreSQL connection management, schema migrations, and the
//! PostgreSQL implementation of the link store.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use migration::run_migrations;
pub use repositories::PgLinkStore;
