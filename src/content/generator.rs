//! Canonical front-matter generation

use super::document::{PageFields, PostFields};
use super::frontmatter::{MatterError, Result};
use super::markdown::MarkdownNormalizer;

/// Site conventions applied while generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub page_layout: String,
    pub post_layout: String,
    /// Hero written when the caller supplies none
    pub default_hero: Option<String>,
    /// Marker closing a post's lead paragraph
    pub lead_marker: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            page_layout: "page".to_string(),
            post_layout: "post".to_string(),
            default_hero: None,
            lead_marker: "{: .lead}\n<!--break-->".to_string(),
        }
    }
}

/// Produces front matter plus a normalized body from explicit field values
#[derive(Debug, Clone, Default)]
pub struct FrontMatterGenerator {
    options: GenerateOptions,
    normalizer: MarkdownNormalizer,
}

impl FrontMatterGenerator {
    pub fn new(options: GenerateOptions) -> Self {
        Self {
            options,
            normalizer: MarkdownNormalizer::new(),
        }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Format a page for the site
    pub fn page_text(&self, fields: &PageFields) -> Result<String> {
        let title = required(&fields.title, "title")?;
        let permalink = required(&fields.permalink, "permalink")?;
        let contents = fields
            .contents
            .as_deref()
            .ok_or(MatterError::MissingRequiredField { field: "contents" })?;

        let header = vec![
            format!("layout: {}", self.options.page_layout),
            format!("title: {}", title),
            format!("permalink: {}", permalink),
        ];

        Ok(assemble(&header, None, &self.normalizer.normalize(contents)))
    }

    /// Format a post for the site
    pub fn post_text(&self, fields: &PostFields) -> Result<String> {
        let title = required(&fields.title, "title")?;
        let author = required(&fields.author, "author")?;
        let body = fields
            .body
            .as_deref()
            .ok_or(MatterError::MissingRequiredField { field: "body" })?;

        let mut header = vec![
            format!("layout: {}", self.options.post_layout),
            format!("title: {}", title),
            format!("author: {}", author),
        ];

        let tags = split_tags(fields.tags.as_deref().unwrap_or_default());
        if !tags.is_empty() {
            header.push("tags:".to_string());
            header.extend(tags.iter().map(|tag| format!("  - {}", tag)));
        }

        let hero = present(&fields.hero_image).or_else(|| {
            self.options
                .default_hero
                .as_deref()
                .filter(|hero| !hero.trim().is_empty())
        });
        if let Some(hero) = hero {
            header.push(format!("hero: {}", hero));
        }

        if let Some(overlay) = present(&fields.overlay) {
            header.push(format!("overlay: {}", overlay));
        }

        if fields.published {
            header.push("published: true".to_string());
        }

        let lead = fields
            .lead_break
            .then_some(self.options.lead_marker.as_str());

        Ok(assemble(&header, lead, &self.normalizer.normalize(body)))
    }
}

fn assemble(header: &[String], lead: Option<&str>, body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 128);
    out.push_str("---\n");
    out.push_str(&header.join("\n"));
    out.push_str("\n---\n");
    if let Some(lead) = lead {
        out.push_str(lead);
        out.push('\n');
    }
    out.push_str(body);
    out
}

/// A required value; blank counts as missing
fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str> {
    present(value).ok_or(MatterError::MissingRequiredField { field })
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Split a comma-separated tag list.
///
/// Surrounding whitespace is trimmed except a trailing `\r`, so a tag carried
/// in from a parsed CRLF document keeps it.
pub fn split_tags(tags: &str) -> Vec<&str> {
    tags.split(',')
        .map(|tag| {
            tag.trim_start_matches(char::is_whitespace)
                .trim_end_matches([' ', '\t', '\n'])
        })
        .filter(|tag| !tag.trim().is_empty())
        .collect()
}

/// Generate page text with default options
pub fn generate_page_text(fields: &PageFields) -> Result<String> {
    FrontMatterGenerator::default().page_text(fields)
}

/// Generate post text with default options
pub fn generate_post_text(fields: &PostFields) -> Result<String> {
    FrontMatterGenerator::default().post_text(fields)
}
