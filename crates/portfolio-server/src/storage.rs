//! Runtime choice between in-memory and file-backed cache storage

use asset_cache::{
    CacheStats, CacheStorage, FileCacheStorage, MemoryCacheStorage, Result, StoredResponse,
};

pub enum SiteStorage {
    Memory(MemoryCacheStorage),
    File(FileCacheStorage),
}

impl CacheStorage for SiteStorage {
    async fn open(&self, name: &str) -> Result<()> {
        match self {
            SiteStorage::Memory(s) => s.open(name).await,
            SiteStorage::File(s) => s.open(name).await,
        }
    }

    async fn keys(&self) -> Result<Vec<String>> {
        match self {
            SiteStorage::Memory(s) => s.keys().await,
            SiteStorage::File(s) => s.keys().await,
        }
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        match self {
            SiteStorage::Memory(s) => s.delete(name).await,
            SiteStorage::File(s) => s.delete(name).await,
        }
    }

    async fn match_request(&self, key: &str) -> Result<Option<StoredResponse>> {
        match self {
            SiteStorage::Memory(s) => s.match_request(key).await,
            SiteStorage::File(s) => s.match_request(key).await,
        }
    }

    async fn put(&self, name: &str, key: &str, response: StoredResponse) -> Result<()> {
        match self {
            SiteStorage::Memory(s) => s.put(name, key, response).await,
            SiteStorage::File(s) => s.put(name, key, response).await,
        }
    }

    async fn stats(&self) -> CacheStats {
        match self {
            SiteStorage::Memory(s) => s.stats().await,
            SiteStorage::File(s) => s.stats().await,
        }
    }
}
