//! Request extractors guarding authenticated routes.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a Bearer token.

pub mod auth;
