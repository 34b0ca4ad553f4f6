//! Shared response bodies.

use serde::Serialize;

/// `{ "message": ... }` body returned by deletes and reorders.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
