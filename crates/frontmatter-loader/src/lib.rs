//! Frontmatter Blog Loader
//!
//! Fetches markdown blog posts over HTTP, splits off their `---` delimited
//! frontmatter, and validates the required metadata fields.

pub mod client;
pub mod error;
pub mod parser;
pub mod types;

pub use client::BlogClient;
pub use error::{LoaderError, Result};
pub use parser::{parse_document, parse_frontmatter, split_document, REQUIRED_FIELDS};
pub use types::{BlogFrontmatter, BlogPost};
