//! Project catalog loaded from a JSON file

use crate::error::Result;
use crate::types::Project;
use std::path::Path;
use tracing::info;

/// How many projects the home page features
pub const FEATURED_COUNT: usize = 3;

/// Ordered list of portfolio projects
#[derive(Debug, Clone, Default)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// Load a JSON array of projects from disk
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let projects: Vec<Project> = serde_json::from_slice(&bytes)?;
        info!(path = ?path, count = projects.len(), "Loaded project catalog");
        Ok(Self::new(projects))
    }

    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    /// The first projects in catalog order
    pub fn featured(&self) -> &[Project] {
        &self.projects[..self.projects.len().min(FEATURED_COUNT)]
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}
