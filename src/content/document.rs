//! Page and post models, and the field sets used to generate them

use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

/// Which content model a file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Page,
    Post,
}

impl DocumentKind {
    /// Posts live under a `_posts` directory, everything else is a page
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let in_posts = path
            .as_ref()
            .components()
            .any(|c| matches!(c, Component::Normal(name) if name == "_posts"));
        if in_posts {
            DocumentKind::Post
        } else {
            DocumentKind::Page
        }
    }
}

/// A standalone site page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDocument {
    /// Location of the page in the site repository
    pub file_path: String,

    /// Revision the page was read at
    pub source_ref: String,

    /// Review request the page's branch is attached to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_link: Option<String>,

    pub title: String,
    pub permalink: String,

    /// Everything after the front matter, verbatim
    pub body: String,
}

/// A blog post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDocument {
    pub file_path: String,
    pub source_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_link: Option<String>,

    pub title: String,
    pub author: String,

    /// Tags joined with `", "`
    pub tags: String,

    /// Hero image URL, empty when not set
    pub hero_image: String,

    /// Hero overlay colour, empty when not set
    pub overlay: String,

    /// Everything after the front matter, verbatim
    pub body: String,
}

/// Either kind of parsed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Document {
    Page(PageDocument),
    Post(PostDocument),
}

impl Document {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Page(_) => DocumentKind::Page,
            Document::Post(_) => DocumentKind::Post,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Document::Page(page) => &page.title,
            Document::Post(post) => &post.title,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Document::Page(page) => &page.body,
            Document::Post(post) => &post.body,
        }
    }
}

/// Generation-only post flags, recovered from raw text when rewriting a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFlags {
    pub published: bool,
    pub lead_break: bool,
}

/// Field values for generating a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageFields {
    pub title: Option<String>,
    pub permalink: Option<String>,
    #[serde(alias = "body")]
    pub contents: Option<String>,
}

impl From<&PageDocument> for PageFields {
    fn from(page: &PageDocument) -> Self {
        Self {
            title: Some(page.title.clone()),
            permalink: Some(page.permalink.clone()),
            contents: Some(page.body.clone()),
        }
    }
}

/// Field values for generating a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostFields {
    #[serde(alias = "contents")]
    pub body: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,

    /// Comma-separated tag list
    pub tags: Option<String>,

    #[serde(alias = "hero")]
    pub hero_image: Option<String>,
    pub overlay: Option<String>,

    /// Carried along for the caller; never written into the header
    pub review_link: Option<String>,

    /// Emit `published: true`
    pub published: bool,

    /// Open the body with the lead marker
    pub lead_break: bool,
}

impl PostFields {
    /// Fields for rewriting a parsed post, keeping its generation-only flags
    pub fn with_flags(post: &PostDocument, flags: PostFlags) -> Self {
        Self {
            published: flags.published,
            lead_break: flags.lead_break,
            ..Self::from(post)
        }
    }
}

impl From<&PostDocument> for PostFields {
    fn from(post: &PostDocument) -> Self {
        Self {
            body: Some(post.body.clone()),
            author: Some(post.author.clone()),
            title: Some(post.title.clone()),
            tags: Some(post.tags.clone()),
            hero_image: Some(post.hero_image.clone()),
            overlay: Some(post.overlay.clone()),
            review_link: post.review_link.clone(),
            published: false,
            lead_break: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_path() {
        assert_eq!(
            DocumentKind::from_path("site/_posts/2024-01-01-hello.md"),
            DocumentKind::Post
        );
        assert_eq!(DocumentKind::from_path("about.md"), DocumentKind::Page);
        assert_eq!(
            DocumentKind::from_path("my_posts/notes.md"),
            DocumentKind::Page
        );
    }

    #[test]
    fn test_post_fields_from_document() {
        let post = PostDocument {
            title: "Some Post".to_string(),
            author: "Andrew".to_string(),
            tags: "announcement, info".to_string(),
            review_link: Some("http://example.com/pull/1".to_string()),
            body: "Body".to_string(),
            ..Default::default()
        };
        let fields = PostFields::from(&post);
        assert_eq!(fields.title.as_deref(), Some("Some Post"));
        assert_eq!(fields.tags.as_deref(), Some("announcement, info"));
        assert_eq!(
            fields.review_link.as_deref(),
            Some("http://example.com/pull/1")
        );
        assert!(!fields.published);

        let flags = PostFlags {
            published: true,
            lead_break: true,
        };
        let fields = PostFields::with_flags(&post, flags);
        assert!(fields.published);
        assert!(fields.lead_break);
        assert_eq!(fields.body.as_deref(), Some("Body"));
    }

    #[test]
    fn test_fields_from_yaml() {
        let yaml = r#"
title: Some Post
author: Andy
hero: bonk
tags: announcement, info
published: true
"#;
        let fields: PostFields = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(fields.hero_image.as_deref(), Some("bonk"));
        assert_eq!(fields.body, None);
        assert!(fields.published);
        assert!(!fields.lead_break);
    }

    #[test]
    fn test_document_serializes_with_kind() {
        let doc = Document::Page(PageDocument {
            title: "About".to_string(),
            ..Default::default()
        });
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["kind"], "page");
        assert_eq!(json["title"], "About");
        assert!(json.get("review_link").is_none());
    }
}
