//! Typed client for the SooMemo REST API.
//!
//! - [`api::ApiClient`] -- one async method per endpoint.
//! - [`session::Session`] -- the bearer token and user, passed explicitly.
//! - [`workspace::Workspace`] -- local mirrors of memos and categories that
//!   are reconciled from server responses after every mutation.

pub mod api;
pub mod error;
pub mod models;
pub mod session;
pub mod workspace;

pub use api::ApiClient;
pub use error::ClientError;
pub use session::Session;
pub use workspace::Workspace;
