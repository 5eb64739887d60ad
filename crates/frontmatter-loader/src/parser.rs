//! Frontmatter splitting and parsing
//!
//! A post looks like:
//!
//! ```text
//! ---
//! title: Hello
//! date: 2024-01-01
//! ...
//! ---
//! Markdown body, which may itself contain ---
//! ```
//!
//! Only the first two delimiters are significant.

use crate::error::{LoaderError, Result};
use crate::types::{BlogFrontmatter, BlogPost};
use std::collections::HashMap;

pub const DELIMITER: &str = "---";

/// Frontmatter keys every post must carry, in validation order
pub const REQUIRED_FIELDS: [&str; 7] = [
    "title",
    "date",
    "author",
    "readTime",
    "category",
    "excerpt",
    "coverImage",
];

/// Split a document into its metadata block and its (untrimmed) body.
///
/// `slug` only labels the error.
pub fn split_document<'a>(slug: &str, text: &'a str) -> Result<(&'a str, &'a str)> {
    let mut parts = text.splitn(3, DELIMITER);
    let _prefix = parts.next();

    match (parts.next(), parts.next()) {
        (Some(metadata), Some(content)) => Ok((metadata, content)),
        _ => Err(LoaderError::Format(slug.to_string())),
    }
}

/// Parse `key: value` lines into a validated frontmatter record.
///
/// Values keep any colons after the first one. Keys outside
/// [`REQUIRED_FIELDS`] are dropped.
pub fn parse_frontmatter(block: &str) -> Result<BlogFrontmatter> {
    let mut fields: HashMap<&str, &str> = HashMap::new();

    for line in block.trim().lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        fields.insert(key, value.trim());
    }

    if let Some(missing) = REQUIRED_FIELDS
        .iter()
        .find(|field| fields.get(*field).map_or(true, |v| v.is_empty()))
    {
        return Err(LoaderError::Validation(missing.to_string()));
    }

    let field = |name: &str| fields.get(name).copied().unwrap_or_default().to_string();

    Ok(BlogFrontmatter {
        title: field("title"),
        date: field("date"),
        author: field("author"),
        read_time: field("readTime"),
        category: field("category"),
        excerpt: field("excerpt"),
        cover_image: field("coverImage"),
    })
}

/// Parse a full post document
pub fn parse_document(slug: &str, text: &str) -> Result<BlogPost> {
    let (metadata, content) = split_document(slug, text)?;
    let frontmatter = parse_frontmatter(metadata)?;

    Ok(BlogPost {
        frontmatter,
        content: content.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\n---\ntitle: A\ndate: 2024-01-01\nauthor: X\nreadTime: 5m\ncategory: C\nexcerpt: E\ncoverImage: I\n---\nBody with --- inside\n";

    #[test]
    fn test_parse_sample_document() {
        let post = parse_document("sample", SAMPLE).unwrap();

        assert_eq!(
            post.frontmatter,
            BlogFrontmatter {
                title: "A".to_string(),
                date: "2024-01-01".to_string(),
                author: "X".to_string(),
                read_time: "5m".to_string(),
                category: "C".to_string(),
                excerpt: "E".to_string(),
                cover_image: "I".to_string(),
            }
        );
        assert_eq!(post.content, "Body with --- inside");
    }

    #[test]
    fn test_body_keeps_every_inner_delimiter() {
        let text = "---\ntitle: T\ndate: D\nauthor: A\nreadTime: R\ncategory: C\nexcerpt: E\ncoverImage: I\n---\none\n---\ntwo --- three\n";
        let post = parse_document("inner", text).unwrap();
        assert_eq!(post.content, "one\n---\ntwo --- three");
    }

    #[test]
    fn test_missing_author_fails_validation() {
        let block = "title: A\ndate: 2024-01-01\nreadTime: 5m\ncategory: C\nexcerpt: E\ncoverImage: I";
        match parse_frontmatter(block) {
            Err(LoaderError::Validation(field)) => assert_eq!(field, "author"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        // both date and excerpt are missing; date comes first
        let block = "title: A\nauthor: X\nreadTime: 5m\ncategory: C\ncoverImage: I";
        match parse_frontmatter(block) {
            Err(LoaderError::Validation(field)) => assert_eq!(field, "date"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_value_fails_validation() {
        let block = "title:   \ndate: D\nauthor: A\nreadTime: R\ncategory: C\nexcerpt: E\ncoverImage: I";
        match parse_frontmatter(block) {
            Err(LoaderError::Validation(field)) => assert_eq!(field, "title"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_value_keeps_colons() {
        let block = "title: A\ndate: D\nauthor: X\nreadTime: 5m\ncategory: C\nexcerpt: Note: read this\ncoverImage: http://example.com/a:b.png";
        let frontmatter = parse_frontmatter(block).unwrap();
        assert_eq!(frontmatter.cover_image, "http://example.com/a:b.png");
        assert_eq!(frontmatter.excerpt, "Note: read this");
    }

    #[test]
    fn test_extra_and_malformed_lines_are_ignored() {
        let block = "\n\ntitle: A\nno colon here\ntags: rust, web\ndate: D\nauthor: X\n: orphan\nreadTime: 5m\ncategory: C\nexcerpt: E\ncoverImage: I\n";
        let frontmatter = parse_frontmatter(block).unwrap();
        assert_eq!(frontmatter.title, "A");
        assert_eq!(frontmatter.cover_image, "I");
    }

    #[test]
    fn test_crlf_lines() {
        let block = "title: A\r\ndate: D\r\nauthor: X\r\nreadTime: 5m\r\ncategory: C\r\nexcerpt: E\r\ncoverImage: I\r\n";
        let frontmatter = parse_frontmatter(block).unwrap();
        assert_eq!(frontmatter.date, "D");
        assert_eq!(frontmatter.cover_image, "I");
    }

    #[test]
    fn test_missing_delimiters_is_format_error() {
        assert!(matches!(
            split_document("plain", "just a body"),
            Err(LoaderError::Format(_))
        ));
        assert!(matches!(
            parse_document("half", "---\ntitle: A\n"),
            Err(LoaderError::Format(slug)) if slug == "half"
        ));
    }

    #[test]
    fn test_split_document_segments() {
        let (metadata, content) = split_document("s", "x---meta---body---more").unwrap();
        assert_eq!(metadata, "meta");
        assert_eq!(content, "body---more");
    }
}
