//! # golinks-core
//!
//! Core crate for go-links. Contains the link directory contract,
//! the link data types and name validation, configuration schemas,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other go-links crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
pub use traits::LinkStore;
pub use types::{Link, LinkName, NewLink};
