//! Session validator: one round-trip that turns a token into an identity.
//!
//! The trait is the seam tests mock. [`HttpSessionValidator`] is the real
//! implementation and calls `GET /auth/me` with the bearer token.

#[cfg(test)]
#[path = "validator_test.rs"]
mod validator_test;

use crate::config::AppConfig;
use crate::net::api::{ApiClient, ApiError, CURRENT_USER_PATH};

use super::store::UserIdentity;

/// Why a validation failed. Callers treat both variants the same way.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The authority could not be reached or answered with garbage.
    #[error("authority unreachable: {0}")]
    Network(String),

    /// The authority refused the token.
    #[error("session rejected: status {status}")]
    Rejected { status: u16 },
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => Self::Rejected { status: 401 },
            ApiError::Status { status } => Self::Rejected { status },
            ApiError::Network(_) | ApiError::Timeout(_) | ApiError::Decode(_) | ApiError::Encode(_) => {
                Self::Network(err.to_string())
            }
        }
    }
}

/// Exchanges a bearer token for a confirmed identity.
///
/// Futures are not `Send`: validation runs on the browser's single thread.
#[async_trait::async_trait(?Send)]
pub trait SessionValidator {
    /// Confirm `token` against the remote authority. `token` is never empty.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when the authority is unreachable or rejects
    /// the token.
    async fn validate(&self, token: &str) -> Result<UserIdentity, AuthError>;
}

/// Validates against the backend's current-user endpoint.
#[derive(Clone, Debug)]
pub struct HttpSessionValidator {
    api: ApiClient,
}

impl HttpSessionValidator {
    /// Client without the global 401 hook: bootstrap owns failure handling.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self { api: ApiClient::new(config) }
    }
}

#[async_trait::async_trait(?Send)]
impl SessionValidator for HttpSessionValidator {
    async fn validate(&self, token: &str) -> Result<UserIdentity, AuthError> {
        let api = self.api.clone().with_token(Some(token));
        let user = api.get_json::<UserIdentity>(CURRENT_USER_PATH).await?;
        Ok(user)
    }
}
