//! Error types for the asset cache

use std::fmt;

#[derive(Debug)]
pub enum AssetCacheError {
    /// Cache storage could not be opened
    CacheOpen(String),
    /// A manifest entry could not be fetched and stored, even after a retry
    ResourceFetch { path: String, reason: String },
    /// The network answered with a non-success status
    Status { path: String, status: u16 },
    /// The origin URL or a request path did not form a valid URL
    InvalidUrl(String),
    Http(Box<reqwest::Error>),
    Io(Box<std::io::Error>),
    Json(serde_json::Error),
}

impl fmt::Display for AssetCacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetCacheError::CacheOpen(msg) => write!(f, "Failed to open cache: {}", msg),
            AssetCacheError::ResourceFetch { path, reason } => {
                write!(f, "Failed to fetch and cache {}: {}", path, reason)
            }
            AssetCacheError::Status { path, status } => {
                write!(f, "Request for {} failed with status {}", path, status)
            }
            AssetCacheError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            AssetCacheError::Http(err) => write!(f, "HTTP error: {}", err),
            AssetCacheError::Io(err) => write!(f, "IO error: {}", err),
            AssetCacheError::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for AssetCacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetCacheError::Http(err) => Some(err.as_ref()),
            AssetCacheError::Io(err) => Some(err.as_ref()),
            AssetCacheError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AssetCacheError {
    fn from(err: reqwest::Error) -> Self {
        AssetCacheError::Http(Box::new(err))
    }
}

impl From<std::io::Error> for AssetCacheError {
    fn from(err: std::io::Error) -> Self {
        AssetCacheError::Io(Box::new(err))
    }
}

impl From<serde_json::Error> for AssetCacheError {
    fn from(err: serde_json::Error) -> Self {
        AssetCacheError::Json(err)
    }
}

impl From<url::ParseError> for AssetCacheError {
    fn from(err: url::ParseError) -> Self {
        AssetCacheError::InvalidUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AssetCacheError>;
