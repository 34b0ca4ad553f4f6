pub mod auth;
pub mod categories;
pub mod health;
pub mod memos;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                         service and database health (public)
///
/// /auth/register                  register (public)
/// /auth/login                     login (public)
/// /auth/me                        current user (requires auth)
///
/// /categories                     list, create
/// /categories/reorder             reorder (PUT)
/// /categories/{id}                update, delete
///
/// /memos                          list (?categoryId=&search=), create
/// /memos/reorder                  reorder (PUT)
/// /memos/{id}                     get, update, delete
/// ```
///
/// Everything except `/health`, `/auth/register` and `/auth/login` requires a
/// Bearer token (enforced by the `AuthUser` extractor).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/memos", memos::router())
}
