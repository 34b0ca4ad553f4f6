/// Errors from the API client and workspace.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server rejected the token (missing, invalid, or expired).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The server returned a non-2xx status other than 401.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `message` field of the error body, or the raw body.
        message: String,
    },

    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The operation needs a signed-in session and there is none.
    #[error("Authentication required")]
    AuthRequired,
}

impl ClientError {
    /// HTTP status of the failure, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(err) => err.status().map(|s| s.as_u16()),
            ClientError::AuthRequired => None,
        }
    }
}
