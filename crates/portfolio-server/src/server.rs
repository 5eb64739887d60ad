//! HTTP server for the portfolio site
//!
//! Serves the blog and project APIs, and answers every other GET from the
//! offline asset cache with a fallback to the origin.

use crate::projects::ProjectCatalog;
use crate::storage::SiteStorage;
use crate::types::{HealthResponse, Project, RefreshResponse};
use asset_cache::{AssetCacheManager, HttpFetcher};
use axum::{
    extract::{Path, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use frontmatter_loader::{BlogClient, BlogPost, LoaderError};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

pub type SiteCache = AssetCacheManager<SiteStorage, HttpFetcher>;

/// Shared state for the HTTP server
pub struct ServerState {
    pub cache: SiteCache,
    pub blog: BlogClient,
    pub projects: ProjectCatalog,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(cache: SiteCache, blog: BlogClient, projects: ProjectCatalog) -> Self {
        Self {
            cache,
            blog,
            projects,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Create the HTTP router
pub fn create_router(state: SharedState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/blog", get(list_posts))
        .route("/api/blog/{slug}", get(get_post))
        .route("/api/projects", get(list_projects))
        .route("/api/projects/featured", get(featured_projects))
        .route("/api/projects/{id}", get(get_project))
        .route("/admin/cache/refresh", post(refresh_cache))
        .fallback(serve_asset)
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
}

/// Start the HTTP server
pub async fn start_server(
    state: SharedState,
    port: u16,
    cors_origins: &[String],
) -> std::io::Result<()> {
    let router = create_router(state, cors_origins);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let cache_stats = state.cache.stats().await;
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0) as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
        cache_version: state.cache.version().to_string(),
        cache: cache_stats,
    })
}

/// List every blog slug from the index
async fn list_posts(State(state): State<SharedState>) -> Response {
    match state.blog.list_slugs().await {
        Ok(slugs) => Json(slugs).into_response(),
        Err(e @ LoaderError::Fetch { .. }) => error_response(StatusCode::BAD_GATEWAY, e.to_string()),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// Get a single parsed blog post
async fn get_post(State(state): State<SharedState>, Path(slug): Path<String>) -> Response {
    match state.blog.get_post(&slug).await {
        Ok(post) => Json::<BlogPost>(post).into_response(),
        Err(e) => {
            let status = match &e {
                LoaderError::Fetch { status: 404, .. } => StatusCode::NOT_FOUND,
                LoaderError::Format(_) | LoaderError::Validation(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                _ => StatusCode::BAD_GATEWAY,
            };
            error_response(status, e.to_string())
        }
    }
}

async fn list_projects(State(state): State<SharedState>) -> Json<Vec<Project>> {
    Json(state.projects.all().to_vec())
}

async fn featured_projects(State(state): State<SharedState>) -> Json<Vec<Project>> {
    Json(state.projects.featured().to_vec())
}

async fn get_project(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    match state.projects.get(&id) {
        Some(project) => Json(project.clone()).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Project not found"),
    }
}

/// Rerun install and activate against the configured manifest
async fn refresh_cache(State(state): State<SharedState>) -> Json<RefreshResponse> {
    let install = state.cache.install().await;
    let activate = state.cache.activate().await;
    Json(RefreshResponse { install, activate })
}

/// Request key for the asset cache: decoded path plus raw query.
///
/// `None` when decoding would change the request's shape: a second leading
/// slash (scheme-relative URL) or an encoded `?` turning into a query.
fn cache_key(uri: &Uri) -> Option<String> {
    let path = urlencoding::decode(uri.path()).ok()?.into_owned();

    if !path.starts_with('/') || path.starts_with("//") || path.contains('?') {
        return None;
    }

    match uri.query() {
        Some(query) => Some(format!("{}?{}", path, query)),
        None => Some(path),
    }
}

/// Answer any other GET from the cache, falling back to the origin
async fn serve_asset(State(state): State<SharedState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET {
        return error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }

    let Some(key) = cache_key(&uri) else {
        warn!(uri = %uri, "Rejected asset request path");
        return error_response(StatusCode::BAD_REQUEST, "Invalid asset path");
    };

    match state.cache.handle_fetch(&key).await {
        Ok((response, source)) => {
            let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let content_type = HeaderValue::from_str(&response.content_type)
                .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

            (
                status,
                [
                    (header::CONTENT_TYPE, content_type),
                    (
                        HeaderName::from_static("x-cache"),
                        HeaderValue::from_static(source.header_value()),
                    ),
                ],
                response.body,
            )
                .into_response()
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Asset unavailable from cache and network");
            error_response(StatusCode::BAD_GATEWAY, "Asset unavailable")
        }
    }
}
