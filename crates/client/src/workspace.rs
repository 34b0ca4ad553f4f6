//! Client-side state: the session plus mirrors of the user's memos and
//! categories.
//!
//! Every mutation is one request; the mirrors are updated from the server's
//! response, never optimistically. A 401 from any authenticated call signs
//! the workspace out before the error is returned.

use std::collections::HashMap;

use soomemo_core::category::is_default_category;
use soomemo_core::memo::CategoryFilter;
use soomemo_core::types::DbId;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::models::{Category, CategoryDraft, CategoryRef, Memo, MemoDraft, User};
use crate::session::Session;

pub struct Workspace {
    api: ApiClient,
    session: Option<Session>,
    memos: Vec<Memo>,
    categories: Vec<Category>,
    filter: CategoryFilter,
    search: String,
}

impl Workspace {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            session: None,
            memos: Vec::new(),
            categories: Vec::new(),
            filter: CategoryFilter::All,
            search: String::new(),
        }
    }

    // ---- accessors ----

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn memos(&self) -> &[Memo] {
        &self.memos
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// The category new memos go into: the default one, else the first.
    pub fn default_category(&self) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| is_default_category(&c.name))
            .or_else(|| self.categories.first())
    }

    // ---- session lifecycle ----

    /// Sign in and load the user's data.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let auth = self.api.login(email, password).await?;
        self.start_session(Session::new(auth.token, auth.user)).await
    }

    /// Create an account, sign in, and load its data.
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let auth = self.api.register(username, email, password).await?;
        self.start_session(Session::new(auth.token, auth.user)).await
    }

    /// Resume a saved session after checking it with `GET /auth/me`.
    ///
    /// On any failure the session is dropped and the workspace stays signed out.
    pub async fn restore(&mut self, saved: Session) -> Result<(), ClientError> {
        match self.api.me(&saved).await {
            Ok(user) => self.start_session(Session::new(saved.token, user)).await,
            Err(err) => {
                tracing::debug!(error = %err, "Saved session rejected");
                self.logout();
                Err(err)
            }
        }
    }

    /// Forget the session and clear every mirror.
    pub fn logout(&mut self) {
        self.session = None;
        self.memos.clear();
        self.categories.clear();
        self.filter = CategoryFilter::All;
        self.search.clear();
    }

    async fn start_session(&mut self, session: Session) -> Result<(), ClientError> {
        tracing::info!(user_id = session.user.id, "Signed in");
        self.session = Some(session);
        self.reload().await
    }

    // ---- loading ----

    /// Fetch memos (with the current filter and search) and categories
    /// concurrently.
    pub async fn reload(&mut self) -> Result<(), ClientError> {
        let session = self.require_session()?;
        let search = self.search_term();
        let result = tokio::try_join!(
            self.api.list_memos(&session, self.filter, search.as_deref()),
            self.api.list_categories(&session),
        );
        let (memos, categories) = self.check(result)?;
        self.memos = memos;
        self.categories = categories;
        Ok(())
    }

    /// Switch the category filter and refetch memos.
    pub async fn select_category(&mut self, filter: CategoryFilter) -> Result<(), ClientError> {
        self.filter = filter;
        self.refresh_memos().await
    }

    /// Change the search query and refetch memos.
    pub async fn set_search(&mut self, query: &str) -> Result<(), ClientError> {
        self.search = query.to_string();
        self.refresh_memos().await
    }

    async fn refresh_memos(&mut self) -> Result<(), ClientError> {
        let session = self.require_session()?;
        let search = self.search_term();
        let result = self
            .api
            .list_memos(&session, self.filter, search.as_deref())
            .await;
        self.memos = self.check(result)?;
        Ok(())
    }

    // ---- memos ----

    /// Create (`id: None`) or update a memo.
    ///
    /// New memos are prepended to the mirror; updates replace in place.
    pub async fn save_memo(
        &mut self,
        id: Option<DbId>,
        draft: &MemoDraft,
    ) -> Result<Memo, ClientError> {
        let session = self.require_session()?;
        let result = match id {
            None => self.api.create_memo(&session, draft).await,
            Some(id) => self.api.update_memo(&session, id, draft).await,
        };
        let saved = self.check(result)?;

        match id {
            None => self.memos.insert(0, saved.clone()),
            Some(id) => {
                if let Some(slot) = self.memos.iter_mut().find(|m| m.id == id) {
                    *slot = saved.clone();
                }
            }
        }
        Ok(saved)
    }

    pub async fn delete_memo(&mut self, id: DbId) -> Result<(), ClientError> {
        let session = self.require_session()?;
        let result = self.api.delete_memo(&session, id).await;
        self.check(result)?;
        self.memos.retain(|m| m.id != id);
        Ok(())
    }

    /// Persist a new memo order; the mirror follows once the server accepts.
    pub async fn reorder_memos(&mut self, ids: &[DbId]) -> Result<(), ClientError> {
        let session = self.require_session()?;
        let result = self.api.reorder_memos(&session, ids).await;
        self.check(result)?;
        apply_order(&mut self.memos, ids, |m| m.id, |m, pos| m.order = pos);
        Ok(())
    }

    // ---- categories ----

    pub async fn add_category(&mut self, draft: &CategoryDraft) -> Result<Category, ClientError> {
        let session = self.require_session()?;
        let result = self.api.create_category(&session, draft).await;
        let created = self.check(result)?;
        self.categories.push(created.clone());
        Ok(created)
    }

    /// Update a category and the summaries embedded in mirrored memos.
    pub async fn update_category(
        &mut self,
        id: DbId,
        draft: &CategoryDraft,
    ) -> Result<Category, ClientError> {
        let session = self.require_session()?;
        let result = self.api.update_category(&session, id, draft).await;
        let updated = self.check(result)?;

        if let Some(slot) = self.categories.iter_mut().find(|c| c.id == id) {
            *slot = updated.clone();
        }
        let summary = CategoryRef {
            id: updated.id,
            name: updated.name.clone(),
            color: updated.color.clone(),
        };
        for memo in self.memos.iter_mut().filter(|m| m.category_id == id) {
            memo.category = summary.clone();
        }
        Ok(updated)
    }

    /// Delete a category. If it was selected the filter falls back to "all".
    ///
    /// The server moves the category's memos into the default category, so
    /// the memo mirror is refetched rather than patched.
    pub async fn delete_category(&mut self, id: DbId) -> Result<(), ClientError> {
        let session = self.require_session()?;
        let result = self.api.delete_category(&session, id).await;
        self.check(result)?;

        self.categories.retain(|c| c.id != id);
        if self.filter == CategoryFilter::Category(id) {
            self.filter = CategoryFilter::All;
        }
        self.refresh_memos().await
    }

    pub async fn reorder_categories(&mut self, ids: &[DbId]) -> Result<(), ClientError> {
        let session = self.require_session()?;
        let result = self.api.reorder_categories(&session, ids).await;
        self.check(result)?;
        apply_order(&mut self.categories, ids, |c| c.id, |c, pos| c.order = pos);
        Ok(())
    }

    // ---- private helpers ----

    fn require_session(&self) -> Result<Session, ClientError> {
        self.session.clone().ok_or(ClientError::AuthRequired)
    }

    fn search_term(&self) -> Option<String> {
        let term = self.search.trim();
        (!term.is_empty()).then(|| term.to_string())
    }

    /// Sign out on 401, then pass the result through.
    fn check<T>(&mut self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if let Err(ClientError::Unauthorized(message)) = &result {
            tracing::info!(%message, "Session rejected by server, signing out");
            self.logout();
        }
        result
    }
}

/// Set `order = index` for each listed id and move those items to the front
/// in that sequence. Unlisted items keep their relative order after them.
fn apply_order<T>(
    items: &mut [T],
    ids: &[DbId],
    id_of: impl Fn(&T) -> DbId,
    mut set_order: impl FnMut(&mut T, i32),
) {
    let positions: HashMap<DbId, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    for item in items.iter_mut() {
        if let Some(pos) = positions.get(&id_of(item)) {
            set_order(item, *pos as i32);
        }
    }
    items.sort_by_key(|item| positions.get(&id_of(item)).copied().unwrap_or(usize::MAX));
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        id: DbId,
        order: i32,
    }

    fn items(ids: &[DbId]) -> Vec<Item> {
        ids.iter().map(|id| Item { id: *id, order: 0 }).collect()
    }

    #[test]
    fn apply_order_follows_submission() {
        let mut list = items(&[1, 2, 3]);
        apply_order(&mut list, &[3, 1, 2], |i| i.id, |i, p| i.order = p);
        assert_eq!(
            list,
            vec![
                Item { id: 3, order: 0 },
                Item { id: 1, order: 1 },
                Item { id: 2, order: 2 },
            ]
        );
    }

    #[test]
    fn apply_order_keeps_unlisted_items_after() {
        let mut list = items(&[1, 2, 3, 4]);
        apply_order(&mut list, &[4, 2], |i| i.id, |i, p| i.order = p);
        let ids: Vec<DbId> = list.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![4, 2, 1, 3]);
    }

    #[test]
    fn apply_order_is_idempotent() {
        let mut list = items(&[5, 6, 7]);
        apply_order(&mut list, &[7, 5, 6], |i| i.id, |i, p| i.order = p);
        let once: Vec<(DbId, i32)> = list.iter().map(|i| (i.id, i.order)).collect();
        apply_order(&mut list, &[7, 5, 6], |i| i.id, |i, p| i.order = p);
        let twice: Vec<(DbId, i32)> = list.iter().map(|i| (i.id, i.order)).collect();
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn mutations_without_session_require_auth() {
        let mut ws = Workspace::new(ApiClient::new("http://127.0.0.1:9"));
        let draft = MemoDraft {
            title: "t".into(),
            content: "c".into(),
            category_id: 1,
        };
        assert_matches!(ws.save_memo(None, &draft).await, Err(ClientError::AuthRequired));
        assert_matches!(ws.reload().await, Err(ClientError::AuthRequired));
        assert_matches!(ws.delete_category(1).await, Err(ClientError::AuthRequired));
    }
}
