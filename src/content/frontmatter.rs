//! Front-matter splitting and field extraction rules
//!
//! A document is `---`, a header, `---`, a line ending, then the body. Header
//! fields are pulled out one rule at a time instead of through a YAML parser,
//! so whatever the source carries (including a stray `\r` before `\n`) ends up
//! in the extracted value untouched.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

use super::markdown::{line_value, lines_inclusive};

/// Errors raised while parsing or generating front matter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatterError {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },
}

pub type Result<T> = std::result::Result<T, MatterError>;

lazy_static! {
    /// Header, the line ending after the closing delimiter, and the body
    static ref DOCUMENT: Regex = Regex::new(r"(?s)---(.*?)---(\r\n|\r|\n)(.*)").unwrap();
}

/// The three regions of a raw document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections<'a> {
    pub header: &'a str,
    pub line_ending: &'a str,
    pub body: &'a str,
}

/// Split raw text into header, closing line ending and body
pub fn split(raw: &str) -> Result<Sections<'_>> {
    let caps = DOCUMENT.captures(raw).ok_or_else(|| {
        MatterError::MalformedDocument("no `---` delimited front matter found".to_string())
    })?;

    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    Ok(Sections {
        header: group(1),
        line_ending: group(2),
        body: group(3),
    })
}

/// How a field's value is laid out in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `name: value` on a single line
    Scalar,
    /// `name:` followed by an indented `  - item` block
    List,
}

/// A single named extraction rule
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    key: Regex,
}

impl FieldRule {
    fn new(name: &'static str, required: bool, kind: FieldKind) -> Self {
        // The key must open a line; `subtitle:` never satisfies `title`.
        let key = Regex::new(&format!(r"(?:\A|[\r\n]){}:[ \t]*", regex::escape(name))).unwrap();
        Self {
            name,
            required,
            kind,
            key,
        }
    }

    pub fn required(name: &'static str) -> Self {
        Self::new(name, true, FieldKind::Scalar)
    }

    pub fn optional(name: &'static str) -> Self {
        Self::new(name, false, FieldKind::Scalar)
    }

    pub fn list(name: &'static str) -> Self {
        Self::new(name, false, FieldKind::List)
    }

    /// Extract this field's value from a header, `None` when the key is absent
    pub fn extract(&self, header: &str) -> Option<String> {
        let m = self.key.find(header)?;
        let rest = &header[m.end()..];
        let (inline, consumed) = line_value(rest);

        match self.kind {
            FieldKind::Scalar => Some(inline.to_string()),
            FieldKind::List => {
                let items: Vec<&str> = lines_inclusive(&rest[consumed..])
                    .map_while(list_item)
                    .collect();
                if items.is_empty() {
                    Some(inline.to_string())
                } else {
                    Some(items.join(", "))
                }
            }
        }
    }
}

/// Value of an indented `- item` line, keeping a `\r` that preceded `\n`
fn list_item(line: &str) -> Option<&str> {
    let indented = line.trim_start_matches([' ', '\t']);
    if indented.len() == line.len() {
        return None;
    }
    let item = indented.strip_prefix('-')?;
    let (value, _) = line_value(item.trim_start_matches([' ', '\t']));
    Some(value)
}

/// Values pulled out of a header by a rule table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    values: HashMap<&'static str, String>,
}

impl HeaderFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Take a field out, empty when it was not present
    pub fn take(&mut self, name: &str) -> String {
        self.values.remove(name).unwrap_or_default()
    }
}

/// Run every rule against the header, failing on the first missing required field
pub fn extract_fields(header: &str, rules: &[FieldRule]) -> Result<HeaderFields> {
    let mut values = HashMap::new();
    for rule in rules {
        match rule.extract(header) {
            Some(value) => {
                values.insert(rule.name, value);
            }
            None if rule.required => {
                return Err(MatterError::MissingRequiredField { field: rule.name });
            }
            None => {}
        }
    }
    Ok(HeaderFields { values })
}
