//! Core type definitions used across the go-links workspace.

pub mod link;
pub mod name;

pub use link::{Link, NewLink, UNTRACKED_IDENTITY};
pub use name::LinkName;
