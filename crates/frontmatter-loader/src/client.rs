//! HTTP client for blog posts served as static markdown files

use crate::error::{LoaderError, Result};
use crate::parser::parse_document;
use crate::types::BlogPost;
use reqwest::Client;
use tracing::{debug, error};

/// Path of the slug index, relative to the base URL
pub const INDEX_PATH: &str = "blogs/index.json";

/// Loads posts from `{base}/blogs/{slug}.md` and the slug list from
/// `{base}/blogs/index.json`
pub struct BlogClient {
    client: Client,
    base_url: String,
}

impl BlogClient {
    /// Create a new client for the site at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a new client with a preconfigured reqwest client
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the markdown file for a slug
    pub fn post_url(&self, slug: &str) -> String {
        format!("{}/blogs/{}.md", self.base_url, urlencoding::encode(slug))
    }

    /// URL of the slug index
    pub fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, INDEX_PATH)
    }

    /// Fetch and parse a single post
    pub async fn get_post(&self, slug: &str) -> Result<BlogPost> {
        self.fetch_post(slug).await.map_err(|e| {
            error!(slug = %slug, error = %e, "Error loading blog post");
            e
        })
    }

    async fn fetch_post(&self, slug: &str) -> Result<BlogPost> {
        let url = self.post_url(slug);
        debug!(url = %url, "Fetching blog post");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LoaderError::Fetch {
                resource: format!("blog post {}", slug),
                status: response.status().as_u16(),
            });
        }

        let text = response.text().await?;
        parse_document(slug, &text)
    }

    /// Fetch the list of available slugs, as listed in the index
    pub async fn list_slugs(&self) -> Result<Vec<String>> {
        self.fetch_slugs().await.map_err(|e| {
            error!(error = %e, "Error loading blog slugs");
            e
        })
    }

    async fn fetch_slugs(&self) -> Result<Vec<String>> {
        let url = self.index_url();
        debug!(url = %url, "Fetching blog index");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LoaderError::Fetch {
                resource: INDEX_PATH.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let slugs: Vec<String> = serde_json::from_slice(&bytes)?;
        debug!(count = slugs.len(), "Loaded blog index");
        Ok(slugs)
    }
}
