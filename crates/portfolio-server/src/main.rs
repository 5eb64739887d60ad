//! Portfolio Server - offline asset cache and blog API for the portfolio site

use asset_cache::{AssetCacheManager, FileCacheStorage, HttpFetcher, MemoryCacheStorage};
use frontmatter_loader::BlogClient;
use portfolio_server::{
    start_server, Config, PortfolioError, ProjectCatalog, Result, ServerState, SharedState,
    SiteStorage,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::from_default_env().add_directive("portfolio_server=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting Portfolio Server...");
    info!("Port: {}", config.port);
    info!("Origin: {}", config.origin_url);
    info!("Blog base: {}", config.blog_base_url);
    info!("Cache version: {}", config.cache_version);
    info!("Manifest entries: {}", config.manifest.len());

    let storage = match &config.cache_dir {
        Some(dir) => {
            info!("Cache dir: {:?}", dir);
            let storage = FileCacheStorage::new(dir.clone());
            storage.init().await?;
            SiteStorage::File(storage)
        }
        None => {
            info!("Cache dir: none (in-memory)");
            SiteStorage::Memory(MemoryCacheStorage::new())
        }
    };

    let fetcher = HttpFetcher::new(&config.origin_url)
        .map_err(|e| PortfolioError::Config(format!("ORIGIN_URL: {}", e)))?;

    let cache = AssetCacheManager::new(
        storage,
        fetcher,
        config.cache_version.clone(),
        config.manifest.clone(),
    );

    // Install then activate, as on a fresh deploy
    let install = cache.install().await;
    if !install.failed.is_empty() {
        warn!(
            failed = install.failed.len(),
            "Some manifest entries were not cached"
        );
    }
    cache.activate().await;

    let projects = match &config.projects_file {
        Some(path) => ProjectCatalog::load(path).await?,
        None => ProjectCatalog::default(),
    };

    let blog = BlogClient::new(&config.blog_base_url);

    let state: SharedState = Arc::new(ServerState::new(cache, blog, projects));

    // Start HTTP server (blocking)
    start_server(state, config.port, &config.cors_origins)
        .await
        .map_err(|e| PortfolioError::Config(format!("Server error: {}", e)))?;

    Ok(())
}
