//! # golinks-store
//!
//! Link store implementations for go-links:
//!
//! - **memory**: concurrent in-process map ([dashmap](https://crates.io/crates/dashmap))
//! - **file**: single JSON snapshot file rewritten on every mutation
//! - **postgres**: adapter from the `golinks-database` crate (feature `postgres`)
//!
//! The backend is selected at startup by [`LinkStoreManager`].

pub mod file;
pub mod memory;
pub mod provider;
mod ranking;

pub use file::FileLinkStore;
pub use memory::MemoryLinkStore;
pub use provider::LinkStoreManager;
