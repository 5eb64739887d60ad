//! Error types for the portfolio server

use std::fmt;

#[derive(Debug)]
pub enum PortfolioError {
    AssetCache(asset_cache::AssetCacheError),
    Io(Box<std::io::Error>),
    Json(serde_json::Error),
    Config(String),
}

impl fmt::Display for PortfolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortfolioError::AssetCache(err) => write!(f, "Asset cache error: {}", err),
            PortfolioError::Io(err) => write!(f, "IO error: {}", err),
            PortfolioError::Json(err) => write!(f, "JSON error: {}", err),
            PortfolioError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for PortfolioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PortfolioError::AssetCache(err) => Some(err),
            PortfolioError::Io(err) => Some(err.as_ref()),
            PortfolioError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<asset_cache::AssetCacheError> for PortfolioError {
    fn from(err: asset_cache::AssetCacheError) -> Self {
        PortfolioError::AssetCache(err)
    }
}

impl From<std::io::Error> for PortfolioError {
    fn from(err: std::io::Error) -> Self {
        PortfolioError::Io(Box::new(err))
    }
}

impl From<serde_json::Error> for PortfolioError {
    fn from(err: serde_json::Error) -> Self {
        PortfolioError::Json(err)
    }
}

impl From<tracing_subscriber::filter::ParseError> for PortfolioError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        PortfolioError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
