//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity matching the database row and
//! the input DTOs its repository accepts.

pub mod category;
pub mod memo;
pub mod user;
