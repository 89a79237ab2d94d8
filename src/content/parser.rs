//! Build page and post models from raw Markdown text

use lazy_static::lazy_static;

use super::document::{PageDocument, PostDocument, PostFlags};
use super::frontmatter::{extract_fields, split, FieldRule, Result};
use super::markdown::strip_lead_break;

lazy_static! {
    static ref PAGE_RULES: Vec<FieldRule> = vec![
        FieldRule::required("title"),
        FieldRule::required("permalink"),
    ];
    static ref POST_RULES: Vec<FieldRule> = vec![
        FieldRule::required("title"),
        FieldRule::required("author"),
        FieldRule::list("tags"),
        FieldRule::optional("hero"),
        FieldRule::optional("overlay"),
    ];
    static ref PUBLISHED: FieldRule = FieldRule::optional("published");
}

/// Knobs for reading site-specific conventions back out of a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Placeholder hero the site fills in; parsed back as "not set"
    pub default_hero: Option<String>,
    /// Remove a leading `{: .lead}` / `<!--break-->` marker from post bodies
    pub strip_lead_break: bool,
}

/// Parses raw page and post text into content models
#[derive(Debug, Clone, Default)]
pub struct FrontMatterParser {
    options: ParseOptions,
}

impl FrontMatterParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a page. `None` input means there is nothing to parse.
    pub fn page(
        &self,
        raw: Option<&str>,
        file_path: &str,
        source_ref: &str,
        review_link: Option<&str>,
    ) -> Result<Option<PageDocument>> {
        let Some(raw) = raw else {
            return Ok(None);
        };

        let sections = split(raw)?;
        let mut fields = extract_fields(sections.header, &PAGE_RULES)?;

        Ok(Some(PageDocument {
            file_path: file_path.to_string(),
            source_ref: source_ref.to_string(),
            review_link: review_link.map(str::to_string),
            title: fields.take("title"),
            permalink: fields.take("permalink"),
            body: sections.body.to_string(),
        }))
    }

    /// Parse a post. `None` input means there is nothing to parse.
    pub fn post(
        &self,
        raw: Option<&str>,
        file_path: &str,
        source_ref: &str,
        review_link: Option<&str>,
    ) -> Result<Option<PostDocument>> {
        let Some(raw) = raw else {
            return Ok(None);
        };

        let sections = split(raw)?;
        let mut fields = extract_fields(sections.header, &POST_RULES)?;

        let mut hero_image = fields.take("hero");
        if self.is_default_hero(&hero_image) {
            hero_image.clear();
        }

        let body = if self.options.strip_lead_break {
            strip_lead_break(sections.body)
        } else {
            sections.body
        };

        Ok(Some(PostDocument {
            file_path: file_path.to_string(),
            source_ref: source_ref.to_string(),
            review_link: review_link.map(str::to_string),
            title: fields.take("title"),
            author: fields.take("author"),
            tags: fields.take("tags"),
            hero_image,
            overlay: fields.take("overlay"),
            body: body.to_string(),
        }))
    }

    /// Recover the flags a post was generated with.
    ///
    /// Neither flag is part of the post model, but rewriting a post must not
    /// unpublish it or lose a lead marker that `strip_lead_break` removed.
    pub fn post_flags(&self, raw: &str) -> PostFlags {
        let Ok(sections) = split(raw) else {
            return PostFlags::default();
        };
        let published = PUBLISHED
            .extract(sections.header)
            .is_some_and(|value| value.trim() == "true");
        let lead_break = self.options.strip_lead_break
            && strip_lead_break(sections.body).len() != sections.body.len();

        PostFlags {
            published,
            lead_break,
        }
    }

    fn is_default_hero(&self, hero: &str) -> bool {
        self.options
            .default_hero
            .as_deref()
            .is_some_and(|placeholder| {
                !hero.is_empty() && hero.trim_end_matches('\r') == placeholder
            })
    }
}

/// Parse a page with default options
pub fn parse_page(
    raw: Option<&str>,
    file_path: &str,
    source_ref: &str,
    review_link: Option<&str>,
) -> Result<Option<PageDocument>> {
    FrontMatterParser::default().page(raw, file_path, source_ref, review_link)
}

/// Parse a post with default options
pub fn parse_post(
    raw: Option<&str>,
    file_path: &str,
    source_ref: &str,
    review_link: Option<&str>,
) -> Result<Option<PostDocument>> {
    FrontMatterParser::default().post(raw, file_path, source_ref, review_link)
}
