//! Named response caches and the versioned core cache.
//!
//! ERROR HANDLING
//! ==============
//! Install is all-or-nothing: if any core entry fails to fetch, nothing is
//! stored and the error names the failing path. The server logs it and keeps
//! running with an empty cache.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{HeaderMap, Method, StatusCode};
use tokio::sync::RwLock;
use tracing::info;

use crate::upstream::{Fetched, Upstream, UpstreamError};

/// Prefix shared by every version of the core cache.
pub const CACHE_PREFIX: &str = "weblobster-core-";

/// Entries pre-cached on install.
pub const CORE_ASSETS: [&str; 5] = ["/", "/index.html", "/styles.css", "/pkg/client.js", "/data/devices.json"];

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("pre-cache of {path} failed: {source}")]
    Fetch {
        path: String,
        #[source]
        source: UpstreamError,
    },
    #[error("pre-cache of {path} returned {status}")]
    Status { path: String, status: StatusCode },
}

/// Cache name for a version string.
#[must_use]
pub fn cache_name(version: &str) -> String {
    format!("{CACHE_PREFIX}{version}")
}

// =============================================================================
// CACHE STORAGE
// =============================================================================

/// All named caches, keyed by name then by request path.
#[derive(Clone, Default)]
pub struct CacheStorage {
    caches: Arc<RwLock<HashMap<String, HashMap<String, Fetched>>>>,
}

impl CacheStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of every cache that exists.
    pub async fn keys(&self) -> Vec<String> {
        let mut names: Vec<String> = self.caches.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    /// Remove a whole cache. Returns whether it existed.
    pub async fn delete(&self, name: &str) -> bool {
        self.caches.write().await.remove(name).is_some()
    }

    pub async fn lookup(&self, name: &str, path: &str) -> Option<Fetched> {
        self.caches.read().await.get(name).and_then(|cache| cache.get(path)).cloned()
    }

    /// Store an entry, creating the cache if needed.
    pub async fn put(&self, name: &str, path: &str, entry: Fetched) {
        self.caches.write().await.entry(name.to_owned()).or_default().insert(path.to_owned(), entry);
    }

    /// Store several entries under one lock.
    pub async fn put_all(&self, name: &str, entries: Vec<(String, Fetched)>) {
        self.caches.write().await.entry(name.to_owned()).or_default().extend(entries);
    }
}

// =============================================================================
// OFFLINE CACHE
// =============================================================================

/// The current version's core cache.
#[derive(Clone)]
pub struct OfflineCache {
    storage: CacheStorage,
    name: String,
}

impl OfflineCache {
    #[must_use]
    pub fn new(storage: CacheStorage, version: &str) -> Self {
        Self { storage, name: cache_name(version) }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pre-cache [`CORE_ASSETS`]. Returns the number of stored entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] for the first entry that cannot be fetched or
    /// answers with a non-success status. Nothing is stored in that case.
    pub async fn install(&self, upstream: &dyn Upstream) -> Result<usize, CacheError> {
        let mut entries = Vec::with_capacity(CORE_ASSETS.len());
        for path in CORE_ASSETS {
            let fetched = upstream
                .fetch(&Method::GET, path, &HeaderMap::new())
                .await
                .map_err(|source| CacheError::Fetch { path: path.to_owned(), source })?;
            if !fetched.is_cacheable() {
                return Err(CacheError::Status { path: path.to_owned(), status: fetched.status });
            }
            entries.push((path.to_owned(), fetched));
        }
        let count = entries.len();
        self.storage.put_all(&self.name, entries).await;
        info!(cache = %self.name, entries = count, "core cache installed");
        Ok(count)
    }

    /// Delete every other version of the core cache. Caches outside the
    /// prefix are left alone. Returns the deleted names.
    pub async fn activate(&self) -> Vec<String> {
        let mut deleted = Vec::new();
        for key in self.storage.keys().await {
            if key.starts_with(CACHE_PREFIX) && key != self.name && self.storage.delete(&key).await {
                deleted.push(key);
            }
        }
        info!(cache = %self.name, deleted = deleted.len(), "core cache activated");
        deleted
    }

    pub async fn lookup(&self, path: &str) -> Option<Fetched> {
        self.storage.lookup(&self.name, path).await
    }

    /// Store `entry` if it is cacheable. Returns whether it was stored.
    pub async fn put(&self, path: &str, entry: Fetched) -> bool {
        if !entry.is_cacheable() {
            return false;
        }
        self.storage.put(&self.name, path, entry).await;
        true
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
