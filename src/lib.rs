//! jekyll-matter: parse and regenerate Jekyll front matter
//!
//! The `content` module is the transformation core: it turns raw page and
//! post text into models and turns field values back into canonical
//! front matter plus a normalized body. It is pure and holds no state.
//! `Site` and `commands` wrap it with configuration and file handling.

pub mod commands;
pub mod config;
pub mod content;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{
    Document, DocumentKind, FrontMatterGenerator, FrontMatterParser, MatterError, PageFields,
    PostFields,
};

/// A site checkout plus its front-matter conventions
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::MatterConfig,
    /// Base directory
    pub base_dir: PathBuf,
    parser: FrontMatterParser,
    generator: FrontMatterGenerator,
}

impl Site {
    /// Open a site directory, reading `_matter.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config = config::MatterConfig::load_from_dir(base_dir.as_ref())?;
        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::MatterConfig) -> Self {
        Self {
            parser: FrontMatterParser::new(config.parse_options()),
            generator: FrontMatterGenerator::new(config.generate_options()),
            base_dir: base_dir.as_ref().to_path_buf(),
            config,
        }
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.base_dir.join(&self.config.posts_dir)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.base_dir.join(&self.config.images_dir)
    }

    pub fn parser(&self) -> &FrontMatterParser {
        &self.parser
    }

    pub fn generator(&self) -> &FrontMatterGenerator {
        &self.generator
    }

    /// Parse raw text as the given kind of document
    pub fn parse(
        &self,
        kind: DocumentKind,
        raw: Option<&str>,
        file_path: &str,
        source_ref: &str,
        review_link: Option<&str>,
    ) -> Result<Option<Document>, MatterError> {
        Ok(match kind {
            DocumentKind::Page => self
                .parser
                .page(raw, file_path, source_ref, review_link)?
                .map(Document::Page),
            DocumentKind::Post => self
                .parser
                .post(raw, file_path, source_ref, review_link)?
                .map(Document::Post),
        })
    }

    /// Regenerate canonical text for a document parsed from `raw`.
    ///
    /// Post flags that the model does not carry are read back from `raw`.
    pub fn regenerate(&self, document: &Document, raw: &str) -> Result<String, MatterError> {
        match document {
            Document::Page(page) => self.generator.page_text(&PageFields::from(page)),
            Document::Post(post) => {
                let flags = self.parser.post_flags(raw);
                self.generator
                    .post_text(&PostFields::with_flags(post, flags))
            }
        }
    }
}
