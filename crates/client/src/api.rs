//! REST client for the SooMemo HTTP endpoints.
//!
//! One async method per endpoint, built on [`reqwest`]. Authenticated calls
//! take a [`Session`] and send its token as a Bearer header.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use soomemo_core::memo::CategoryFilter;
use soomemo_core::types::DbId;

use crate::error::ClientError;
use crate::models::{
    AuthResponse, Category, CategoryDraft, ErrorBody, HealthResponse, MeResponse, Memo, MemoDraft,
    MessageResponse, User,
};
use crate::session::Session;

/// HTTP client for one SooMemo server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url`, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- auth ----

    /// `POST /auth/register`.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ClientError> {
        let body = json!({ "username": username, "email": email, "password": password });
        let request = self.request(Method::POST, "/auth/register", None).json(&body);
        Self::parse_response(request.send().await?).await
    }

    /// `POST /auth/login`.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = json!({ "email": email, "password": password });
        let request = self.request(Method::POST, "/auth/login", None).json(&body);
        Self::parse_response(request.send().await?).await
    }

    /// `GET /auth/me`.
    pub async fn me(&self, session: &Session) -> Result<User, ClientError> {
        let request = self.request(Method::GET, "/auth/me", Some(session));
        let me: MeResponse = Self::parse_response(request.send().await?).await?;
        Ok(me.user)
    }

    // ---- categories ----

    /// `GET /categories`.
    pub async fn list_categories(&self, session: &Session) -> Result<Vec<Category>, ClientError> {
        let request = self.request(Method::GET, "/categories", Some(session));
        Self::parse_response(request.send().await?).await
    }

    /// `POST /categories`.
    pub async fn create_category(
        &self,
        session: &Session,
        draft: &CategoryDraft,
    ) -> Result<Category, ClientError> {
        let request = self
            .request(Method::POST, "/categories", Some(session))
            .json(draft);
        Self::parse_response(request.send().await?).await
    }

    /// `PUT /categories/{id}`.
    pub async fn update_category(
        &self,
        session: &Session,
        id: DbId,
        draft: &CategoryDraft,
    ) -> Result<Category, ClientError> {
        let request = self
            .request(Method::PUT, &format!("/categories/{id}"), Some(session))
            .json(draft);
        Self::parse_response(request.send().await?).await
    }

    /// `PUT /categories/reorder`.
    pub async fn reorder_categories(
        &self,
        session: &Session,
        ids: &[DbId],
    ) -> Result<MessageResponse, ClientError> {
        let request = self
            .request(Method::PUT, "/categories/reorder", Some(session))
            .json(&json!({ "categoryIds": ids }));
        Self::parse_response(request.send().await?).await
    }

    /// `DELETE /categories/{id}`.
    pub async fn delete_category(
        &self,
        session: &Session,
        id: DbId,
    ) -> Result<MessageResponse, ClientError> {
        let request = self.request(Method::DELETE, &format!("/categories/{id}"), Some(session));
        Self::parse_response(request.send().await?).await
    }

    // ---- memos ----

    /// `GET /memos?categoryId=&search=`. A blank search is not sent.
    pub async fn list_memos(
        &self,
        session: &Session,
        filter: CategoryFilter,
        search: Option<&str>,
    ) -> Result<Vec<Memo>, ClientError> {
        let mut query = vec![("categoryId", filter.to_string())];
        if let Some(term) = search.filter(|s| !s.trim().is_empty()) {
            query.push(("search", term.to_string()));
        }
        let request = self
            .request(Method::GET, "/memos", Some(session))
            .query(&query);
        Self::parse_response(request.send().await?).await
    }

    /// `GET /memos/{id}`.
    pub async fn get_memo(&self, session: &Session, id: DbId) -> Result<Memo, ClientError> {
        let request = self.request(Method::GET, &format!("/memos/{id}"), Some(session));
        Self::parse_response(request.send().await?).await
    }

    /// `POST /memos`.
    pub async fn create_memo(
        &self,
        session: &Session,
        draft: &MemoDraft,
    ) -> Result<Memo, ClientError> {
        let request = self.request(Method::POST, "/memos", Some(session)).json(draft);
        Self::parse_response(request.send().await?).await
    }

    /// `PUT /memos/{id}`.
    pub async fn update_memo(
        &self,
        session: &Session,
        id: DbId,
        draft: &MemoDraft,
    ) -> Result<Memo, ClientError> {
        let request = self
            .request(Method::PUT, &format!("/memos/{id}"), Some(session))
            .json(draft);
        Self::parse_response(request.send().await?).await
    }

    /// `DELETE /memos/{id}`.
    pub async fn delete_memo(
        &self,
        session: &Session,
        id: DbId,
    ) -> Result<MessageResponse, ClientError> {
        let request = self.request(Method::DELETE, &format!("/memos/{id}"), Some(session));
        Self::parse_response(request.send().await?).await
    }

    /// `PUT /memos/reorder`.
    pub async fn reorder_memos(
        &self,
        session: &Session,
        ids: &[DbId],
    ) -> Result<MessageResponse, ClientError> {
        let request = self
            .request(Method::PUT, "/memos/reorder", Some(session))
            .json(&json!({ "memoIds": ids }));
        Self::parse_response(request.send().await?).await
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let request = self.request(Method::GET, "/health", None);
        Self::parse_response(request.send().await?).await
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match session {
            Some(session) => builder.bearer_auth(&session.token),
            None => builder,
        }
    }

    /// Map non-2xx responses to [`ClientError`], using the body's `message`.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized(message));
        }
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
