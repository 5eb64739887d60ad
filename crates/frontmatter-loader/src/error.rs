//! Error types for the blog loader

use std::fmt;

#[derive(Debug)]
pub enum LoaderError {
    /// A post or the index answered with a non-success status
    Fetch { resource: String, status: u16 },
    /// The document lacks the `---` frontmatter delimiters
    Format(String),
    /// A required frontmatter field is missing or empty; holds the field name
    Validation(String),
    Http(Box<reqwest::Error>),
    Json(serde_json::Error),
}

impl LoaderError {
    /// HTTP status of a failed fetch, if that is what this error is
    pub fn fetch_status(&self) -> Option<u16> {
        match self {
            LoaderError::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::Fetch { resource, status } => {
                write!(f, "Failed to load {}: status {}", resource, status)
            }
            LoaderError::Format(slug) => {
                write!(f, "Invalid markdown format for blog post: {}", slug)
            }
            LoaderError::Validation(field) => write!(f, "Missing required field: {}", field),
            LoaderError::Http(err) => write!(f, "HTTP error: {}", err),
            LoaderError::Json(err) => write!(f, "JSON parsing error: {}", err),
        }
    }
}

impl std::error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoaderError::Http(err) => Some(err.as_ref()),
            LoaderError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LoaderError {
    fn from(err: reqwest::Error) -> Self {
        LoaderError::Http(Box::new(err))
    }
}

impl From<serde_json::Error> for LoaderError {
    fn from(err: serde_json::Error) -> Self {
        LoaderError::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;
