//! Network fetching of site assets

use crate::error::{AssetCacheError, Result};
use crate::types::StoredResponse;
use reqwest::Client;
use std::future::Future;
use tracing::debug;
use url::Url;

/// Network collaborator returning a status and payload for a request path
///
/// A non-success status is a normal response here; only transport failures
/// are errors.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<StoredResponse>> + Send;
}

/// HTTP client for fetching assets from the site origin
pub struct HttpFetcher {
    client: Client,
    origin: Url,
}

impl HttpFetcher {
    /// Create a fetcher for the given origin URL
    pub fn new(origin: &str) -> Result<Self> {
        Self::with_client(Client::new(), origin)
    }

    /// Create a fetcher with a preconfigured reqwest client
    pub fn with_client(client: Client, origin: &str) -> Result<Self> {
        let origin = Url::parse(origin)?;
        Ok(Self { client, origin })
    }

    /// Resolve a request path (with optional `?query`) on the origin.
    ///
    /// Only absolute paths with a single leading `/` are accepted, and the
    /// result must stay on the origin's scheme, host and port.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        if !path.starts_with('/') || path.starts_with("//") {
            return Err(AssetCacheError::InvalidUrl(format!(
                "not an origin-relative path: {}",
                path
            )));
        }

        let (path_part, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };

        let mut url = self.origin.clone();
        url.set_path(path_part);
        url.set_query(query);
        url.set_fragment(None);

        if url.origin() != self.origin.origin() {
            return Err(AssetCacheError::InvalidUrl(format!(
                "{} leaves origin {}",
                url,
                self.origin.origin().ascii_serialization()
            )));
        }
        Ok(url)
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<StoredResponse> {
        let url = self.resolve(path)?;
        debug!(url = %url, "Fetching asset from origin");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let body = response.bytes().await?.to_vec();

        debug!(
            url = %url,
            status,
            size = body.len(),
            content_type = %content_type,
            "Fetched asset"
        );

        Ok(StoredResponse {
            status,
            content_type,
            body,
        })
    }
}
