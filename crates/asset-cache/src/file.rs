//! File-based cache storage
//!
//! Each named cache is a directory under the storage root, named by the
//! SHA-256 of the cache name. Entries are stored as `<sha256(key)>.body`
//! with a `<sha256(key)>.json` metadata sidecar. Both are written to temp
//! files and renamed into place, sidecar last; an entry without a sidecar,
//! or whose body length disagrees with it, is treated as absent.

use crate::error::Result;
use crate::storage::CacheStorage;
use crate::types::{CacheStats, EntryMeta, StoredResponse};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::{debug, info, warn};

/// File holding the cache name inside each cache directory
const NAME_FILE: &str = "cache-name";

/// Cache storage persisted to the local filesystem
pub struct FileCacheStorage {
    root: PathBuf,
    hits: AtomicU64,
    misses: AtomicU64,
    /// Suffix source for temp file names
    writes: AtomicU64,
}

impl FileCacheStorage {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            writes: AtomicU64::new(0),
        }
    }

    /// Ensure the storage root exists
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        info!(root = ?self.root, "Cache storage initialized");
        Ok(())
    }

    /// Generate the on-disk file stem for a request key
    pub fn entry_stem(key: &str) -> String {
        sha256_hex(key)
    }

    /// Directory for a cache name; distinct names never share a directory
    fn cache_dir(&self, name: &str) -> PathBuf {
        self.root.join(sha256_hex(name))
    }

    /// Write `data` next to `dest` under a temp name, then rename over `dest`
    async fn write_replace(&self, dest: &Path, data: &[u8]) -> Result<()> {
        let n = self.writes.fetch_add(1, Ordering::Relaxed);
        let tmp = dest.with_extension(format!("{}.tmp", n));

        if let Err(e) = fs::write(&tmp, data).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp, dest).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Cache directories in name order, paired with their stored names
    async fn cache_dirs(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut dirs = Vec::new();

        let mut read_dir = match fs::read_dir(&self.root).await {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(dirs),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = read_dir.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let path = entry.path();
            let name = match fs::read_to_string(path.join(NAME_FILE)).await {
                Ok(name) => name,
                Err(_) => entry.file_name().to_string_lossy().into_owned(),
            };
            dirs.push((name, path));
        }

        dirs.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(dirs)
    }

    async fn read_entry(dir: &Path, stem: &str) -> Result<Option<StoredResponse>> {
        let meta = match fs::read(dir.join(format!("{}.json", stem))).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let meta: EntryMeta = serde_json::from_slice(&meta)?;
        let body = match fs::read(dir.join(format!("{}.body", stem))).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // Body and sidecar from different writes
        if body.len() as u64 != meta.size {
            return Ok(None);
        }

        Ok(Some(StoredResponse {
            status: meta.status,
            content_type: meta.content_type,
            body,
        }))
    }
}

impl CacheStorage for FileCacheStorage {
    async fn open(&self, name: &str) -> Result<()> {
        let dir = self.cache_dir(name);
        fs::create_dir_all(&dir).await?;
        fs::write(dir.join(NAME_FILE), name).await?;
        debug!(cache = %name, dir = ?dir, "Opened cache");
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self
            .cache_dirs()
            .await?
            .into_iter()
            .map(|(name, _)| name)
            .collect())
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        match fs::remove_dir_all(self.cache_dir(name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn match_request(&self, key: &str) -> Result<Option<StoredResponse>> {
        let stem = Self::entry_stem(key);

        for (name, dir) in self.cache_dirs().await? {
            match Self::read_entry(&dir, &stem).await {
                Ok(Some(response)) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    debug!(cache = %name, key = %key, "Cache hit");
                    return Ok(Some(response));
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(cache = %name, key = %key, error = %e, "Failed to read cached entry");
                }
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }

    async fn put(&self, name: &str, key: &str, response: StoredResponse) -> Result<()> {
        self.open(name).await?;

        let dir = self.cache_dir(name);
        let stem = Self::entry_stem(key);
        let size = response.body.len() as u64;
        let meta_path = dir.join(format!("{}.json", stem));

        // Drop the old sidecar first so the entry reads as absent, never as
        // old metadata paired with a new body
        match fs::remove_file(&meta_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        self.write_replace(&dir.join(format!("{}.body", stem)), &response.body)
            .await?;

        let meta = EntryMeta {
            key: key.to_string(),
            status: response.status,
            content_type: response.content_type,
            size,
            created_at: Utc::now(),
        };
        self.write_replace(&meta_path, &serde_json::to_vec_pretty(&meta)?)
            .await?;

        debug!(cache = %name, key = %key, size, "Cached response");
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        let mut stats = CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            ..CacheStats::default()
        };

        let dirs = match self.cache_dirs().await {
            Ok(dirs) => dirs,
            Err(e) => {
                warn!(root = ?self.root, error = %e, "Failed to list caches");
                return stats;
            }
        };
        stats.caches = dirs.len();

        for (_, dir) in dirs {
            let Ok(mut read_dir) = fs::read_dir(&dir).await else {
                continue;
            };
            while let Ok(Some(entry)) = read_dir.next_entry().await {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    if let Ok(bytes) = fs::read(&path).await {
                        if let Ok(meta) = serde_json::from_slice::<EntryMeta>(&bytes) {
                            stats.entries += 1;
                            stats.total_size += meta.size;
                        }
                    }
                }
            }
        }

        stats
    }
}

fn sha256_hex(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_similar_names_stay_distinct() {
        let dir = tempdir().unwrap();
        let storage = FileCacheStorage::new(dir.path().to_path_buf());
        storage.init().await.unwrap();

        storage
            .put("site:v1", "/", StoredResponse::new(200, "text/html", "colon"))
            .await
            .unwrap();
        storage
            .put("site_v1", "/", StoredResponse::new(200, "text/html", "underscore"))
            .await
            .unwrap();

        assert_eq!(
            storage.keys().await.unwrap(),
            vec!["site:v1".to_string(), "site_v1".to_string()]
        );

        assert!(storage.delete("site:v1").await.unwrap());
        assert_eq!(storage.keys().await.unwrap(), vec!["site_v1".to_string()]);
        let found = storage.match_request("/").await.unwrap().unwrap();
        assert_eq!(found.body, b"underscore");
    }

    #[tokio::test]
    async fn test_dot_names_stay_inside_root() {
        let parent = tempdir().unwrap();
        let root = parent.path().join("caches");
        let storage = FileCacheStorage::new(root.clone());
        storage.init().await.unwrap();

        storage.open("..").await.unwrap();
        storage.open(".").await.unwrap();

        assert!(!parent.path().join(NAME_FILE).exists());
        assert!(!root.join(NAME_FILE).exists());
        assert_eq!(
            storage.keys().await.unwrap(),
            vec![".".to_string(), "..".to_string()]
        );
    }

    #[tokio::test]
    async fn test_overwrite_replaces_whole_entry() {
        let dir = tempdir().unwrap();
        let storage = FileCacheStorage::new(dir.path().to_path_buf());
        storage.init().await.unwrap();

        storage
            .put("v1", "/app.js", StoredResponse::new(200, "text/javascript", "a much longer first body"))
            .await
            .unwrap();
        storage
            .put("v1", "/app.js", StoredResponse::new(203, "application/javascript", "short"))
            .await
            .unwrap();

        let found = storage.match_request("/app.js").await.unwrap().unwrap();
        assert_eq!(found.status, 203);
        assert_eq!(found.content_type, "application/javascript");
        assert_eq!(found.body, b"short");

        // no temp files left behind
        let mut read_dir = fs::read_dir(storage.cache_dir("v1")).await.unwrap();
        while let Some(entry) = read_dir.next_entry().await.unwrap() {
            let name = entry.file_name().to_string_lossy().into_owned();
            assert!(!name.ends_with(".tmp"), "leftover temp file {}", name);
        }

        let stats = storage.stats().await;
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.total_size, 5);
    }

    #[tokio::test]
    async fn test_body_not_matching_sidecar_is_absent() {
        let dir = tempdir().unwrap();
        let storage = FileCacheStorage::new(dir.path().to_path_buf());
        storage.init().await.unwrap();

        storage
            .put("v1", "/index.html", StoredResponse::new(200, "text/html", "<html></html>"))
            .await
            .unwrap();

        // a body truncated behind the sidecar's back
        let stem = FileCacheStorage::entry_stem("/index.html");
        fs::write(storage.cache_dir("v1").join(format!("{}.body", stem)), b"<ht")
            .await
            .unwrap();

        assert!(storage.match_request("/index.html").await.unwrap().is_none());
    }

    #[test]
    fn test_entry_stem_generation() {
        let stem1 = FileCacheStorage::entry_stem("/index.html");
        let stem2 = FileCacheStorage::entry_stem("/index.html");
        let stem3 = FileCacheStorage::entry_stem("/Images/ME.jpg");

        assert_eq!(stem1, stem2);
        assert_ne!(stem1, stem3);
        assert_eq!(stem1.len(), 64);
        assert!(stem1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_put_and_match() {
        let dir = tempdir().unwrap();
        let storage = FileCacheStorage::new(dir.path().to_path_buf());
        storage.init().await.unwrap();

        let response = StoredResponse::new(200, "image/png", vec![0x89, 0x50, 0x4e, 0x47]);
        storage
            .put("portfolio-cache-v1", "/Images/Logo.png", response.clone())
            .await
            .unwrap();

        let found = storage.match_request("/Images/Logo.png").await.unwrap();
        assert_eq!(found, Some(response));
    }

    #[tokio::test]
    async fn test_keys_preserve_names() {
        let dir = tempdir().unwrap();
        let storage = FileCacheStorage::new(dir.path().to_path_buf());
        storage.init().await.unwrap();

        storage.open("site:v2").await.unwrap();
        storage.open("site:v1").await.unwrap();

        assert_eq!(
            storage.keys().await.unwrap(),
            vec!["site:v1".to_string(), "site:v2".to_string()]
        );
    }

    #[tokio::test]
    async fn test_delete_cache() {
        let dir = tempdir().unwrap();
        let storage = FileCacheStorage::new(dir.path().to_path_buf());
        storage.init().await.unwrap();

        storage
            .put("old", "/", StoredResponse::new(200, "text/html", "old home"))
            .await
            .unwrap();

        assert!(storage.delete("old").await.unwrap());
        assert!(!storage.delete("old").await.unwrap());
        assert!(storage.match_request("/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_root_lists_no_caches() {
        let dir = tempdir().unwrap();
        let storage = FileCacheStorage::new(dir.path().join("never-created"));

        assert!(storage.keys().await.unwrap().is_empty());
        assert!(storage.match_request("/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stats() {
        let dir = tempdir().unwrap();
        let storage = FileCacheStorage::new(dir.path().to_path_buf());
        storage.init().await.unwrap();

        storage
            .put("v1", "/a", StoredResponse::new(200, "text/plain", "test data"))
            .await
            .unwrap();
        storage.match_request("/a").await.unwrap();
        storage.match_request("/b").await.unwrap();

        let stats = storage.stats().await;
        assert_eq!(stats.caches, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.total_size, 9);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }
}
