//! Typed client for the jobseeker REST API (`/api/v1`).
//!
//! One method per backend operation, grouped by service in the submodules.
//! No retries, no caching, no batching: every call is a single HTTP request
//! and every non-2xx response becomes a structured [`ApiError`].
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::errors::ApiError;

pub mod comparisons;
pub mod job_postings;
pub mod login;
pub mod model_names;
pub mod users;
pub mod utils;

pub const API_PREFIX: &str = "/api/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Shared HTTP client. Clones share the connection pool and the bearer token.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let api = Self::with_timeout(&config.api_base_url, config.request_timeout)?;
        api.set_token(config.api_token.clone());
        Ok(api)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// Starts a request against `path` (relative to `/api/v1`), attaching the bearer token.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}{}", method, API_PREFIX, path);
        let builder = self.client.request(method, self.url(path));
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and deserializes a successful JSON body.
    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        Self::parse_response(response).await
    }

    /// Sends the request and returns a successful body as text.
    async fn send_text(builder: RequestBuilder) -> Result<String, ApiError> {
        let response = Self::ensure_success(builder.send().await?).await?;
        Ok(response.text().await?)
    }

    /// Returns the response unchanged on success, or the parsed error body.
    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status.as_u16(), &body));
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(ApiError::Decode)
    }
}
