//! Parse a document and print its model

use anyhow::{Context, Result};
use std::path::Path;

use super::{read_document, resolve_kind, site_relative};
use crate::content::{Document, DocumentKind};
use crate::Site;

/// Parse a file into a content model
pub fn parse_file(
    site: &Site,
    path: &Path,
    kind: Option<DocumentKind>,
    source_ref: &str,
    review_link: Option<&str>,
) -> Result<Option<Document>> {
    let raw = read_document(path)?;
    parse_text(site, path, &raw, kind, source_ref, review_link)
}

/// Parse already-read text, recording `path` in the model
pub fn parse_text(
    site: &Site,
    path: &Path,
    raw: &str,
    kind: Option<DocumentKind>,
    source_ref: &str,
    review_link: Option<&str>,
) -> Result<Option<Document>> {
    let kind = resolve_kind(kind, path);
    tracing::debug!("Parsing {:?} as {:?}", path, kind);

    site.parse(
        kind,
        Some(raw),
        &site_relative(site, path),
        source_ref,
        review_link,
    )
    .with_context(|| format!("Failed to parse {:?}", path))
}

/// Run the parse command
pub fn run(
    site: &Site,
    path: &Path,
    kind: Option<DocumentKind>,
    source_ref: &str,
    review_link: Option<&str>,
) -> Result<()> {
    match parse_file(site, path, kind, source_ref, review_link)? {
        Some(document) => println!("{}", serde_json::to_string_pretty(&document)?),
        None => tracing::warn!("Nothing to parse in {:?}", path),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_file_infers_post() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("_posts");
        fs::create_dir_all(&posts).unwrap();
        let path = posts.join("2024-01-15-hello.md");
        fs::write(
            &path,
            "---\nlayout: post\ntitle: Hello\nauthor: Me\ntags:\n  - rust\n---\nBody\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        let document = parse_file(&site, &path, None, "abc", None)
            .unwrap()
            .unwrap();

        match document {
            Document::Post(post) => {
                assert_eq!(post.file_path, "_posts/2024-01-15-hello.md");
                assert_eq!(post.source_ref, "abc");
                assert_eq!(post.tags, "rust");
                assert_eq!(post.body, "Body\n");
            }
            other => panic!("expected a post, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_file_reports_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("about.md");
        fs::write(&path, "no front matter here").unwrap();

        let site = Site::new(dir.path()).unwrap();
        let err = parse_file(&site, &path, None, "abc", None).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
