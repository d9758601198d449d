//! Client-side query cache with tag-based invalidation.
//!
//! Each key maps to the last fetched payload and a freshness flag. Mutations
//! invalidate the keys they affect; the next `fetch` for a stale key goes back
//! to the API. There is no eviction.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    CurrentUser,
    Users,
    ModelNames,
}

impl QueryKey {
    pub const ALL: [QueryKey; 3] = [QueryKey::CurrentUser, QueryKey::Users, QueryKey::ModelNames];
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Value,
    fresh: bool,
}

#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<QueryKey, CacheEntry>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value when fresh, otherwise runs `fetcher` and stores its result.
    /// A failed fetch leaves any previous entry untouched.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(data) = self.fresh_value(key) {
            debug!(?key, "query cache hit");
            return Ok(serde_json::from_value(data)?);
        }

        debug!(?key, "query cache miss");
        let data = fetcher().await?;
        self.set(key, &data)?;
        Ok(data)
    }

    /// Cached value regardless of freshness.
    pub fn get<T: DeserializeOwned>(&self, key: QueryKey) -> Option<T> {
        let data = self.lock().get(&key).map(|e| e.data.clone())?;
        serde_json::from_value(data).ok()
    }

    /// Stores `data` under `key` as fresh.
    pub fn set<T: Serialize>(&self, key: QueryKey, data: &T) -> Result<(), ApiError> {
        let data = serde_json::to_value(data)?;
        self.lock().insert(key, CacheEntry { data, fresh: true });
        Ok(())
    }

    /// Marks the given keys stale. Cached data stays readable through `get`.
    pub fn invalidate(&self, keys: &[QueryKey]) {
        let mut entries = self.lock();
        for key in keys {
            if let Some(entry) = entries.get_mut(key) {
                entry.fresh = false;
            }
        }
        debug!(?keys, "query cache invalidated");
    }

    pub fn is_fresh(&self, key: QueryKey) -> bool {
        self.lock().get(&key).is_some_and(|e| e.fresh)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn fresh_value(&self, key: QueryKey) -> Option<Value> {
        self.lock()
            .get(&key)
            .filter(|e| e.fresh)
            .map(|e| e.data.clone())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
