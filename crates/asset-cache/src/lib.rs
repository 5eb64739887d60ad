//! Versioned offline asset cache
//!
//! Pre-caches a fixed manifest of site assets under a versioned cache name,
//! reclaims caches left over from older versions, and answers requests
//! cache-first with a network fallback.

pub mod error;
pub mod fetch;
pub mod file;
pub mod manager;
pub mod memory;
pub mod storage;
pub mod types;

pub use error::{AssetCacheError, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use file::FileCacheStorage;
pub use manager::AssetCacheManager;
pub use memory::MemoryCacheStorage;
pub use storage::CacheStorage;
pub use types::{ActivateReport, CacheSource, CacheStats, InstallReport, StoredResponse};
