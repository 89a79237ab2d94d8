//! Rewrite a document with canonical front matter

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::parse::parse_text;
use super::read_document;
use crate::content::DocumentKind;
use crate::Site;

/// Parse a file and regenerate it. `None` when there was nothing to parse.
pub fn format_file(site: &Site, path: &Path, kind: Option<DocumentKind>) -> Result<Option<String>> {
    let raw = read_document(path)?;
    let Some(document) = parse_text(site, path, &raw, kind, "", None)? else {
        return Ok(None);
    };
    let text = site
        .regenerate(&document, &raw)
        .with_context(|| format!("Failed to regenerate {:?}", path))?;
    Ok(Some(text))
}

/// Run the fmt command
pub fn run(site: &Site, path: &Path, kind: Option<DocumentKind>, write: bool) -> Result<()> {
    let Some(text) = format_file(site, path, kind)? else {
        tracing::warn!("Nothing to format in {:?}", path);
        return Ok(());
    };

    if write {
        fs::write(path, &text).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::info!("Formatted {:?}", path);
    } else {
        print!("{}", text);
    }

    Ok(())
}
