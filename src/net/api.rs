//! REST API client for the storefront backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, raced against a
//! `gloo-timers` timeout. Server-side (SSR): every call fails with
//! [`ApiError::Network`] since these endpoints only make sense in the browser.
//!
//! ERROR HANDLING
//! ==============
//! A 401 from any call is reported as [`ApiError::Unauthorized`] and fires the
//! optional unauthorized hook. The app installs a hook that performs the global
//! logout; the route guard then redirects. The session validator uses a client
//! without the hook because bootstrap handles its own failures.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

/// Errors produced by backend calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Network(String),

    /// No response within the configured timeout.
    #[error("request timed out after {0}ms")]
    Timeout(u32),

    /// The backend answered 401.
    #[error("unauthorized")]
    Unauthorized,

    /// The backend answered with another non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16 },

    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Decode(String),

    /// The request body could not be encoded.
    #[error("request encode failed: {0}")]
    Encode(String),
}

/// Callback fired whenever a request comes back 401.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Thin JSON client bound to one API base URL.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    timeout_ms: u32,
    token: Option<String>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("has_token", &self.token.is_some())
            .field("has_unauthorized_hook", &self.on_unauthorized.is_some())
            .finish()
    }
}

impl ApiClient {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            timeout_ms: config.request_timeout_ms,
            token: None,
            on_unauthorized: None,
        }
    }

    /// Attach (or drop) the bearer token sent with every request.
    #[must_use]
    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.token = token.map(str::to_owned);
        self
    }

    /// Install the global 401 handler.
    #[must_use]
    pub fn on_unauthorized(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    /// Full URL for `path` under this client's base.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// `GET path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, timeout, non-2xx status,
    /// or an undecodable body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = self.authorize(gloo_net::http::Request::get(&self.url(path))).build();
            let response = self.send(request).await?;
            decode(response).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
            Err(not_available())
        }
    }

    /// `POST path` with a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ApiClient::get_json`], plus [`ApiError::Encode`].
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = self.authorize(gloo_net::http::Request::post(&self.url(path))).json(body);
            let response = self.send(request).await?;
            decode(response).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (path, body);
            Err(not_available())
        }
    }

    /// `PUT path` with a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ApiClient::post_json`].
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = self.authorize(gloo_net::http::Request::put(&self.url(path))).json(body);
            let response = self.send(request).await?;
            decode(response).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (path, body);
            Err(not_available())
        }
    }

    /// Pass `result` through, firing the unauthorized hook on a 401.
    #[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
    fn intercept<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if matches!(result, Err(ApiError::Unauthorized)) {
            log::info!("backend returned 401; forcing logout");
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
        }
        result
    }

    #[cfg(feature = "hydrate")]
    fn authorize(&self, builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match &self.token {
            Some(token) => builder.header("Authorization", &bearer(token)),
            None => builder,
        }
    }

    #[cfg(feature = "hydrate")]
    async fn send(
        &self,
        request: Result<gloo_net::http::Request, gloo_net::Error>,
    ) -> Result<gloo_net::http::Response, ApiError> {
        use futures::future::{Either, select};

        let request = request.map_err(|e| ApiError::Encode(e.to_string()))?;
        let send = std::pin::pin!(request.send());
        let timeout = std::pin::pin!(gloo_timers::future::TimeoutFuture::new(self.timeout_ms));
        let result = match select(send, timeout).await {
            Either::Left((sent, _)) => sent
                .map_err(|e| ApiError::Network(e.to_string()))
                .and_then(|response| classify_status(response.status()).map(|()| response)),
            Either::Right(((), _)) => Err(ApiError::Timeout(self.timeout_ms)),
        };
        self.intercept(result)
    }
}

#[cfg(feature = "hydrate")]
async fn decode<T: DeserializeOwned>(response: gloo_net::http::Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(not(feature = "hydrate"))]
fn not_available() -> ApiError {
    ApiError::Network("not available on server".to_owned())
}

/// Join a base URL and a path with exactly one slash between them.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_owned();
    }
    format!("{base}/{path}")
}

/// `Authorization` header value for a bearer token.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Map an HTTP status to success or the matching [`ApiError`].
///
/// # Errors
///
/// [`ApiError::Unauthorized`] for 401, [`ApiError::Status`] for any other
/// status outside `200..300`.
pub fn classify_status(status: u16) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 => Err(ApiError::Unauthorized),
        status => Err(ApiError::Status { status }),
    }
}

// =============================================================================
// AUTH ENDPOINTS
// =============================================================================

pub const LOGIN_PATH: &str = "/auth/login";
pub const CURRENT_USER_PATH: &str = "/auth/me";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Body of a successful sign-in.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
}

/// Exchange credentials for a bearer token via `POST /auth/login`.
///
/// # Errors
///
/// [`ApiError::Unauthorized`] for bad credentials, otherwise any transport or
/// decode failure.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    api.post_json(LOGIN_PATH, &LoginRequest { email, password }).await
}
