//! Generate a document from a field file

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::read_document;
use crate::content::{DocumentKind, PageFields, PostFields};
use crate::Site;

/// Render canonical text from YAML (or JSON) field values
pub fn render(site: &Site, fields_yaml: &str, kind: DocumentKind) -> Result<String> {
    let text = match kind {
        DocumentKind::Page => {
            let fields: PageFields =
                serde_yaml::from_str(fields_yaml).context("Invalid page fields")?;
            site.generator().page_text(&fields)?
        }
        DocumentKind::Post => {
            let fields: PostFields =
                serde_yaml::from_str(fields_yaml).context("Invalid post fields")?;
            site.generator().post_text(&fields)?
        }
    };
    Ok(text)
}

/// Run the generate command
pub fn run(
    site: &Site,
    fields_path: &Path,
    kind: DocumentKind,
    output: Option<&Path>,
) -> Result<()> {
    let fields_yaml = read_document(fields_path)?;
    let text = render(site, &fields_yaml, kind)
        .with_context(|| format!("Failed to generate from {:?}", fields_path))?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &text).with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!("Generated {:?}", path);
        }
        None => print!("{}", text),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatterConfig;
    use crate::content::MatterError;

    #[test]
    fn test_render_post() {
        let site = Site::with_config(".", MatterConfig::default());
        let yaml = r##"
title: Some Post
author: Andy
tags: "announcement, info"
overlay: green
published: true
body: "#Hello"
"##;
        let text = render(&site, yaml, DocumentKind::Post).unwrap();
        assert_eq!(
            text,
            "---\nlayout: post\ntitle: Some Post\nauthor: Andy\ntags:\n  - announcement\n  - info\noverlay: green\npublished: true\n---\n# Hello"
        );
    }

    #[test]
    fn test_render_page_from_json() {
        let site = Site::with_config(".", MatterConfig::default());
        let json = r#"{"title": "About", "permalink": "/about/", "contents": "Hi"}"#;
        let text = render(&site, json, DocumentKind::Page).unwrap();
        assert_eq!(
            text,
            "---\nlayout: page\ntitle: About\npermalink: /about/\n---\nHi"
        );
    }

    #[test]
    fn test_render_missing_field() {
        let site = Site::with_config(".", MatterConfig::default());
        let err = render(&site, "title: About\ncontents: Hi\n", DocumentKind::Page).unwrap_err();
        assert_eq!(
            err.downcast_ref::<MatterError>(),
            Some(&MatterError::MissingRequiredField { field: "permalink" })
        );
    }
}
