//! SooMemo domain core.
//!
//! Zero internal dependencies: error taxonomy, id/timestamp aliases, and the
//! pure validation and search helpers shared by the API server and the
//! client library.

pub mod category;
pub mod error;
pub mod memo;
pub mod reorder;
pub mod types;
pub mod validation;
