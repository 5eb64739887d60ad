//! Cache storage backends
//!
//! A storage holds any number of named caches, each mapping a request key
//! to a stored response. Lookups by key search every cache.

use crate::error::Result;
use crate::types::{CacheStats, StoredResponse};
use std::future::Future;

/// Named, request-keyed response storage
pub trait CacheStorage: Send + Sync {
    /// Open a named cache, creating it if absent
    fn open(&self, name: &str) -> impl Future<Output = Result<()>> + Send;

    /// List the names of every existing cache
    fn keys(&self) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Delete a named cache and all its entries, returns whether it existed
    fn delete(&self, name: &str) -> impl Future<Output = Result<bool>> + Send;

    /// Look up an exact key match in any cache
    fn match_request(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<StoredResponse>>> + Send;

    /// Store a response under a key in the named cache
    fn put(
        &self,
        name: &str,
        key: &str,
        response: StoredResponse,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Current storage statistics
    fn stats(&self) -> impl Future<Output = CacheStats> + Send;
}
