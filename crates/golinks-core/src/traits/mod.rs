//! Core traits defined in `golinks-core` and implemented by other crates.

pub mod store;

pub use store::LinkStore;
