use std::env;
use std::path::PathBuf;

pub const DEFAULT_CACHE_VERSION: &str = "portfolio-cache-v1";

/// Assets pre-cached when `CACHE_MANIFEST` is not set
pub const DEFAULT_MANIFEST: [&str; 7] = [
    "/",
    "/index.html",
    "/assets/main-BEPDGT-e.css",
    "/assets/main-DuH4v69u.js",
    "/Images/Logo.png",
    "/Images/ME.jpg",
    "/Images/Container right.jpg",
];

/// Server configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Origin serving the static site assets
    pub origin_url: String,
    /// Where `blogs/` lives; defaults to the origin
    pub blog_base_url: String,
    /// File-backed cache root; in-memory cache when unset
    pub cache_dir: Option<PathBuf>,
    pub cache_version: String,
    pub manifest: Vec<String>,
    pub projects_file: Option<PathBuf>,
    /// Allowed CORS origins; permissive when empty
    pub cors_origins: Vec<String>,
    pub json_logs: bool,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Parse configuration from an arbitrary variable lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let origin_url = var("ORIGIN_URL").unwrap_or_else(|| "http://localhost:5173".to_string());

        let blog_base_url = var("BLOG_BASE_URL").unwrap_or_else(|| origin_url.clone());

        let cache_dir = var("CACHE_DIR").map(PathBuf::from);

        let cache_version =
            var("CACHE_VERSION").unwrap_or_else(|| DEFAULT_CACHE_VERSION.to_string());

        let manifest = var("CACHE_MANIFEST")
            .map(|s| split_list(&s))
            .unwrap_or_else(|| DEFAULT_MANIFEST.iter().map(|p| p.to_string()).collect());

        let projects_file = var("PROJECTS_FILE").map(PathBuf::from);

        let cors_origins = var("CORS_ORIGINS")
            .map(|s| split_list(&s))
            .unwrap_or_default();

        let json_logs = var("LOG_FORMAT").is_some_and(|v| v == "json");

        Self {
            port,
            origin_url,
            blog_base_url,
            cache_dir,
            cache_version,
            manifest,
            projects_file,
            cors_origins,
            json_logs,
        }
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
