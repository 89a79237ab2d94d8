//! Reference-style image lookup
//!
//! Parsing and generation never need images. Callers that do (see
//! `commands::check`) pass an [`ImageResolver`] in explicitly.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref DEFINITION: Regex =
        Regex::new(r"(?m)^ {0,3}\[([^\]\r\n]+)\]:[ \t]*(\S+)").unwrap();
    static ref REFERENCE_IMAGE: Regex = Regex::new(r"!\[([^\]\r\n]*)\]\[([^\]\r\n]*)\]").unwrap();
}

/// An `![alt][label]` use in a body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReference {
    pub alt: String,
    pub label: String,
    /// Target from the matching `[label]: url` line, if any
    pub url: Option<String>,
}

/// Collect every reference-style image and the URL its label points at.
///
/// Labels match case-insensitively; `![logo][]` uses its alt text as label.
pub fn reference_images(body: &str) -> Vec<ImageReference> {
    let definitions: HashMap<String, &str> = DEFINITION
        .captures_iter(body)
        .filter_map(|caps| {
            let label = caps.get(1)?.as_str().to_lowercase();
            Some((label, caps.get(2)?.as_str()))
        })
        .collect();

    REFERENCE_IMAGE
        .captures_iter(body)
        .map(|caps| {
            let alt = caps.get(1).map_or("", |m| m.as_str());
            let label = match caps.get(2).map_or("", |m| m.as_str()) {
                "" => alt,
                label => label,
            };
            ImageReference {
                alt: alt.to_string(),
                label: label.to_string(),
                url: definitions
                    .get(&label.to_lowercase())
                    .map(|url| url.to_string()),
            }
        })
        .collect()
}

/// Where an image URL points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Hosted elsewhere; not ours to check
    Remote,
    /// Found on disk
    Local(PathBuf),
    /// Expected on disk but absent
    Missing(PathBuf),
}

/// Maps image URLs in a document to attachments
pub trait ImageResolver {
    fn resolve(&self, url: &str) -> Resolution;
}

/// Resolves site-relative image URLs against a directory
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    root: PathBuf,
}

impl DirectoryResolver {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ImageResolver for DirectoryResolver {
    fn resolve(&self, url: &str) -> Resolution {
        if url.contains("://") || url.starts_with("//") || url.starts_with("data:") {
            return Resolution::Remote;
        }

        // Drop any query or fragment before touching the filesystem
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let candidate = self.root.join(path.trim_start_matches('/'));
        if candidate.is_file() {
            Resolution::Local(candidate)
        } else {
            Resolution::Missing(candidate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reference_images() {
        let body = "[Logo]: http://x/y.png\r\n![alt text][logo]\r\n\r\n![missing][nope]\n![banner][]\n\n[banner]: /img/banner.jpg \"Banner\"";
        let refs = reference_images(body);
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0].label, "logo");
        assert_eq!(refs[0].url.as_deref(), Some("http://x/y.png"));
        assert_eq!(refs[1].url, None);
        assert_eq!(refs[2].label, "banner");
        assert_eq!(refs[2].url.as_deref(), Some("/img/banner.jpg"));
    }

    #[test]
    fn test_inline_images_are_not_references() {
        assert!(reference_images("![alt](http://x/y.png)").is_empty());
    }

    #[test]
    fn test_directory_resolver() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("img/logo.png"), b"png").unwrap();

        let resolver = DirectoryResolver::new(dir.path());
        assert_eq!(resolver.resolve("https://x/y.png"), Resolution::Remote);
        assert_eq!(
            resolver.resolve("/img/logo.png?v=2"),
            Resolution::Local(dir.path().join("img/logo.png"))
        );
        assert_eq!(
            resolver.resolve("img/gone.png"),
            Resolution::Missing(dir.path().join("img/gone.png"))
        );
    }
}
