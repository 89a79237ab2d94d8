//! Content module - page/post models, front-matter parsing and generation

pub mod document;
pub mod frontmatter;
pub mod generator;
pub mod images;
pub mod markdown;
pub mod parser;

pub use document::{
    Document, DocumentKind, PageDocument, PageFields, PostDocument, PostFields, PostFlags,
};
pub use frontmatter::{FieldRule, MatterError};
pub use generator::{generate_page_text, generate_post_text, FrontMatterGenerator, GenerateOptions};
pub use images::{DirectoryResolver, ImageReference, ImageResolver, Resolution};
pub use markdown::MarkdownNormalizer;
pub use parser::{parse_page, parse_post, FrontMatterParser, ParseOptions};

/// Normalize a Markdown body the way the generator does
pub fn normalize_body(body: &str) -> String {
    MarkdownNormalizer::new().normalize(body)
}
