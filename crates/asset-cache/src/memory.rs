//! In-memory cache storage

use crate::error::Result;
use crate::storage::CacheStorage;
use crate::types::{CacheStats, StoredResponse};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Cache storage kept entirely in process memory
#[derive(Default)]
pub struct MemoryCacheStorage {
    /// Cache name -> (request key -> response), names kept sorted
    caches: RwLock<BTreeMap<String, HashMap<String, StoredResponse>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStorage for MemoryCacheStorage {
    async fn open(&self, name: &str) -> Result<()> {
        let mut caches = self.caches.write().await;
        caches.entry(name.to_string()).or_default();
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let caches = self.caches.read().await;
        Ok(caches.keys().cloned().collect())
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        let mut caches = self.caches.write().await;
        Ok(caches.remove(name).is_some())
    }

    async fn match_request(&self, key: &str) -> Result<Option<StoredResponse>> {
        let caches = self.caches.read().await;
        let found = caches.values().find_map(|entries| entries.get(key).cloned());

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }

        Ok(found)
    }

    async fn put(&self, name: &str, key: &str, response: StoredResponse) -> Result<()> {
        let size = response.body.len();
        let mut caches = self.caches.write().await;
        caches
            .entry(name.to_string())
            .or_default()
            .insert(key.to_string(), response);
        debug!(cache = %name, key = %key, size, "Cached response");
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        let caches = self.caches.read().await;
        CacheStats {
            caches: caches.len(),
            entries: caches.values().map(HashMap::len).sum(),
            total_size: caches
                .values()
                .flat_map(HashMap::values)
                .map(|r| r.body.len() as u64)
                .sum(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
