//! Repository layer.
//!
//! `UserRepo` is a zero-sized struct whose methods take `&PgPool`. Category
//! and memo repositories are constructed for a caller with `for_user`, and
//! every query they issue is filtered by that user's id.

pub mod category_repo;
pub mod memo_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use memo_repo::MemoRepo;
pub use user_repo::UserRepo;
