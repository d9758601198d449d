//! Login state: the bearer token on the client plus the cached current user.

use tracing::info;

use crate::api::ApiClient;
use crate::cache::{QueryCache, QueryKey};
use crate::errors::ApiError;
use crate::models::{LoginForm, Token, User};

/// Everything a controller needs to talk to the backend on behalf of one user.
#[derive(Clone)]
pub struct Session {
    pub api: ApiClient,
    pub cache: QueryCache,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cache: QueryCache::new(),
        }
    }

    /// Exchanges credentials for a token and primes the current-user cache.
    pub async fn login(&self, username: &str, password: &str) -> Result<Token, ApiError> {
        let token = self
            .api
            .login_access_token(&LoginForm::new(username, password))
            .await?;
        self.api.set_token(Some(token.access_token.clone()));
        self.cache.clear();

        let user = self.api.read_user_me().await?;
        self.cache.set(QueryKey::CurrentUser, &user)?;
        info!(username = %user.username, "Logged in");
        Ok(token)
    }

    pub fn logout(&self) {
        self.api.set_token(None);
        self.cache.clear();
        info!("Logged out");
    }

    pub fn is_logged_in(&self) -> bool {
        self.api.has_token()
    }

    /// Current user, served from the cache while fresh.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.cache
            .fetch(QueryKey::CurrentUser, || self.api.read_user_me())
            .await
    }

    /// Cached current user without hitting the network.
    pub fn cached_user(&self) -> Option<User> {
        self.cache.get(QueryKey::CurrentUser)
    }

    /// Checks the stored token against the backend.
    pub async fn verify_token(&self) -> Result<User, ApiError> {
        let user = self.api.test_token().await?;
        self.cache.set(QueryKey::CurrentUser, &user)?;
        Ok(user)
    }
}
