//! API types for the portfolio server

use asset_cache::{ActivateReport, CacheStats, InstallReport};
use serde::{Deserialize, Serialize};

/// A portfolio project entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub cache_version: String,
    pub cache: CacheStats,
}

/// Result of rerunning the cache lifecycle
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub install: InstallReport,
    pub activate: ActivateReport,
}
