//! Site conventions (_matter.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::{GenerateOptions, ParseOptions};

/// Name of the config file looked up in the base directory
pub const CONFIG_FILE: &str = "_matter.yml";

/// Front-matter conventions of the target site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatterConfig {
    // Layouts
    pub post_layout: String,
    pub page_layout: String,

    // Posts
    /// Placeholder hero the theme falls back to
    pub default_hero: Option<String>,
    pub lead_marker: String,
    pub strip_lead_break: bool,

    // Directories
    pub posts_dir: String,
    pub images_dir: String,
}

impl Default for MatterConfig {
    fn default() -> Self {
        let generate = GenerateOptions::default();
        Self {
            post_layout: generate.post_layout,
            page_layout: generate.page_layout,

            default_hero: None,
            lead_marker: generate.lead_marker,
            strip_lead_break: false,

            posts_dir: "_posts".to_string(),
            images_dir: ".".to_string(),
        }
    }
}

impl MatterConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: MatterConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config {:?}", path))?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load `_matter.yml` from a directory, falling back to defaults
    pub fn load_from_dir<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let path = base_dir.as_ref().join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir.as_ref());
            Ok(Self::default())
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            default_hero: self.default_hero.clone(),
            strip_lead_break: self.strip_lead_break,
        }
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            page_layout: self.page_layout.clone(),
            post_layout: self.post_layout.clone(),
            default_hero: self.default_hero.clone(),
            lead_marker: self.lead_marker.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatterConfig::default();
        assert_eq!(config.post_layout, "post");
        assert_eq!(config.page_layout, "page");
        assert_eq!(config.posts_dir, "_posts");
        assert_eq!(config.default_hero, None);
        assert!(!config.strip_lead_break);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
post_layout: article
default_hero: https://source.unsplash.com/collection/145103/
strip_lead_break: true
"#;
        let config: MatterConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.post_layout, "article");
        assert_eq!(config.page_layout, "page");

        let parse = config.parse_options();
        assert!(parse.strip_lead_break);
        assert_eq!(
            parse.default_hero.as_deref(),
            Some("https://source.unsplash.com/collection/145103/")
        );
        assert_eq!(config.generate_options().post_layout, "article");
    }

    #[test]
    fn test_load_from_dir_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = MatterConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, MatterConfig::default());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "posts_dir: blog/_posts\n").unwrap();
        let config = MatterConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.posts_dir, "blog/_posts");
    }
}
