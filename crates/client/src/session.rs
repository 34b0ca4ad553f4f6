use crate::models::User;

/// An authenticated session: the bearer token and who it belongs to.
///
/// Every authenticated [`ApiClient`](crate::ApiClient) call takes a
/// `&Session`; the client itself holds no credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}
