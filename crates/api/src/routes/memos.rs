//! Route definitions for the `/memos` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::memos;
use crate::state::AppState;

/// Routes mounted at `/memos`.
///
/// ```text
/// GET    /          -> list_memos
/// POST   /          -> create_memo
/// PUT    /reorder   -> reorder_memos
/// GET    /{id}      -> get_memo
/// PUT    /{id}      -> update_memo
/// DELETE /{id}      -> delete_memo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(memos::list_memos).post(memos::create_memo))
        .route("/reorder", put(memos::reorder_memos))
        .route(
            "/{id}",
            get(memos::get_memo)
                .put(memos::update_memo)
                .delete(memos::delete_memo),
        )
}
