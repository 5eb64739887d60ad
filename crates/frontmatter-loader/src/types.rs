//! Blog post types

use serde::{Deserialize, Serialize};

/// Validated frontmatter of a blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogFrontmatter {
    pub title: String,
    pub date: String,
    pub author: String,
    pub read_time: String,
    pub category: String,
    pub excerpt: String,
    pub cover_image: String,
}

/// A parsed blog post: frontmatter plus trimmed markdown body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub frontmatter: BlogFrontmatter,
    pub content: String,
}
