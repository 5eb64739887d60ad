//! Cache types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A response as stored in (or served from) a cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl StoredResponse {
    pub fn new(status: u16, content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// On-disk metadata for a cached entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryMeta {
    pub key: String,
    pub status: u16,
    pub content_type: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
}

/// Statistics about the cache storage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub caches: usize,
    pub entries: usize,
    pub total_size: u64,
    pub hits: u64,
    pub misses: u64,
}

/// Where a response handed back by the manager came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
    Cache,
    Network,
}

impl CacheSource {
    /// Value for the `X-Cache` response header
    pub fn header_value(self) -> &'static str {
        match self {
            CacheSource::Cache => "HIT",
            CacheSource::Network => "MISS",
        }
    }
}

/// Outcome of an install pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstallReport {
    pub cache_name: String,
    pub opened: bool,
    pub cached: Vec<String>,
    /// (path, reason) for every entry that could not be cached
    pub failed: Vec<(String, String)>,
}

/// Outcome of an activate pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivateReport {
    pub current: String,
    pub deleted: Vec<String>,
}
