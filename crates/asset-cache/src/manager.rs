//! Versioned asset cache lifecycle: install, activate, and fetch interception

use crate::error::{AssetCacheError, Result};
use crate::fetch::Fetcher;
use crate::storage::CacheStorage;
use crate::types::{ActivateReport, CacheSource, CacheStats, InstallReport, StoredResponse};
use futures::future::join_all;
use tracing::{debug, error, info, warn};

/// Coordinates a cache storage and a network fetcher for one cache version
pub struct AssetCacheManager<S, F> {
    storage: S,
    fetcher: F,
    /// Name of the single current cache; every other name is stale
    version: String,
    /// Paths pre-cached on install, in order
    manifest: Vec<String>,
}

impl<S: CacheStorage, F: Fetcher> AssetCacheManager<S, F> {
    pub fn new(storage: S, fetcher: F, version: impl Into<String>, manifest: Vec<String>) -> Self {
        Self {
            storage,
            fetcher,
            version: version.into(),
            manifest,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn manifest(&self) -> &[String] {
        &self.manifest
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn stats(&self) -> CacheStats {
        self.storage.stats().await
    }

    /// Open the current cache and pre-cache every manifest entry.
    ///
    /// Entries are fetched concurrently and a failing entry never aborts the
    /// rest. Failing to open the cache ends the install with nothing cached.
    pub async fn install(&self) -> InstallReport {
        let mut report = InstallReport {
            cache_name: self.version.clone(),
            ..InstallReport::default()
        };

        if let Err(e) = self.storage.open(&self.version).await {
            let err = AssetCacheError::CacheOpen(e.to_string());
            error!(cache = %self.version, error = %err, "Install aborted");
            return report;
        }
        report.opened = true;

        let results = join_all(self.manifest.iter().map(|path| self.cache_entry(path))).await;

        for (path, result) in self.manifest.iter().zip(results) {
            match result {
                Ok(()) => report.cached.push(path.clone()),
                Err(e) => report.failed.push((path.clone(), e.to_string())),
            }
        }

        info!(
            cache = %self.version,
            cached = report.cached.len(),
            failed = report.failed.len(),
            "Install complete"
        );
        report
    }

    /// Cache one manifest entry, retrying once with a manual fetch
    async fn cache_entry(&self, path: &str) -> Result<()> {
        let first_err = match self.add(path).await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        debug!(path = %path, error = %first_err, "Add failed, retrying with manual fetch");

        let result = async {
            let response = self.fetcher.fetch(path).await?;
            if !response.is_success() {
                return Err(AssetCacheError::Status {
                    path: path.to_string(),
                    status: response.status,
                });
            }
            self.storage.put(&self.version, path, response).await
        }
        .await;

        result.map_err(|e| {
            let err = AssetCacheError::ResourceFetch {
                path: path.to_string(),
                reason: e.to_string(),
            };
            error!(path = %path, error = %err, "Failed to fetch and cache resource");
            err
        })
    }

    /// Fetch a path and store it only if the status is a success
    async fn add(&self, path: &str) -> Result<()> {
        let response = self.fetcher.fetch(path).await?;
        if !response.is_success() {
            return Err(AssetCacheError::Status {
                path: path.to_string(),
                status: response.status,
            });
        }
        self.storage.put(&self.version, path, response).await
    }

    /// Delete every cache whose name is not the current version
    pub async fn activate(&self) -> ActivateReport {
        let mut report = ActivateReport {
            current: self.version.clone(),
            ..ActivateReport::default()
        };

        let names = match self.storage.keys().await {
            Ok(names) => names,
            Err(e) => {
                error!(error = %e, "Failed to list caches during activate");
                return report;
            }
        };

        let stale: Vec<String> = names.into_iter().filter(|n| *n != self.version).collect();
        let results = join_all(stale.iter().map(|name| self.storage.delete(name))).await;

        for (name, result) in stale.into_iter().zip(results) {
            match result {
                Ok(true) => {
                    info!(cache = %name, "Deleted stale cache");
                    report.deleted.push(name);
                }
                Ok(false) => debug!(cache = %name, "Stale cache already gone"),
                Err(e) => warn!(cache = %name, error = %e, "Failed to delete stale cache"),
            }
        }

        report
    }

    /// Answer a request from any cache, falling back to the network.
    ///
    /// Network responses are returned as-is and never written back.
    pub async fn handle_fetch(&self, path: &str) -> Result<(StoredResponse, CacheSource)> {
        match self.storage.match_request(path).await {
            Ok(Some(response)) => return Ok((response, CacheSource::Cache)),
            Ok(None) => {}
            Err(e) => warn!(path = %path, error = %e, "Cache lookup failed"),
        }

        let response = self.fetcher.fetch(path).await?;
        Ok((response, CacheSource::Network))
    }
}
