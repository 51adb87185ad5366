//! # golinks-auth
//!
//! Caller identity for go-links.
//!
//! Federated login happens outside this service. What arrives here is a
//! signed session token in a cookie; this crate verifies it and yields the
//! caller's email. When login is not configured every caller is
//! `"untracked"`.
//!
//! ## Modules
//!
//! - `jwt`: session token claims, verification and issuance
//! - `identity`: maps an optional cookie value to an identity

pub mod identity;
pub mod jwt;

pub use identity::IdentityResolver;
pub use jwt::{JwtDecoder, JwtEncoder, SessionClaims};
