//! CLI commands

pub mod check;
pub mod fmt;
pub mod generate;
pub mod new;
pub mod parse;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::content::DocumentKind;
use crate::Site;

/// Read a document from disk
pub(crate) fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

/// Path as recorded in a document model: relative to the site when possible
pub(crate) fn site_relative(site: &Site, path: &Path) -> String {
    path.strip_prefix(&site.base_dir)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// The requested kind, or the one implied by the file's location
pub(crate) fn resolve_kind(kind: Option<DocumentKind>, path: &Path) -> DocumentKind {
    kind.unwrap_or_else(|| DocumentKind::from_path(path))
}
