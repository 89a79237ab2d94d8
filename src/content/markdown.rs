//! Markdown body normalization
//!
//! Only the generator normalizes bodies; parsed bodies are left exactly as
//! they were found. Every transformation here works line by line and keeps
//! each line's own terminator (`\n`, `\r\n` or a bare `\r`).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// One to six `#` glued to the heading text
    static ref HEADING: Regex = Regex::new(r"^(#{1,6})([^#\s])").unwrap();

    /// A reference-style image opening the body, optionally after its definition
    static ref LEADING_REFERENCE_IMAGE: Regex = Regex::new(
        r"\A(?:\[[^\]\r\n]+\]:[^\r\n]*(?:\r\n|\r|\n))?!\[[^\]\r\n]*\]\[[^\]\r\n]*\]"
    )
    .unwrap();

    /// `{: .lead}` followed by the break comment, in either dash spelling
    static ref LEAD_BREAK: Regex = Regex::new(
        r"\A\{: \.lead\}[ \t]*(?:\r\n|\r|\n)<![-–]{2}break[-–]{2}>[ \t]*(?:\r\n|\r|\n)?"
    )
    .unwrap();
}

/// Iterator over lines that keeps each line's terminator attached
pub struct LinesInclusive<'a> {
    rest: &'a str,
}

impl<'a> Iterator for LinesInclusive<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let (_, consumed) = line_value(self.rest);
        let (line, rest) = self.rest.split_at(consumed);
        self.rest = rest;
        Some(line)
    }
}

/// Split text into lines, recognising `\r\n`, `\r` and `\n`
pub fn lines_inclusive(text: &str) -> LinesInclusive<'_> {
    LinesInclusive { rest: text }
}

/// The value of the first line in `text` and how many bytes the line spans.
///
/// The line ending is dropped with one exception: the `\r` of a `\r\n` pair
/// stays in the value. Front-matter values have always carried it, and the
/// site content generated from them depends on it.
pub fn line_value(text: &str) -> (&str, usize) {
    match text.find(['\r', '\n']) {
        None => (text, text.len()),
        Some(i) if text.as_bytes()[i] == b'\n' => (&text[..i], i + 1),
        Some(i) if text[i + 1..].starts_with('\n') => (&text[..=i], i + 2),
        Some(i) => (&text[..i], i + 1),
    }
}

/// The first line ending used in `text`, `\n` when it has none
pub fn line_ending_of(text: &str) -> &'static str {
    match text.find(['\r', '\n']) {
        Some(i) if text[i..].starts_with("\r\n") => "\r\n",
        Some(i) if text.as_bytes()[i] == b'\r' => "\r",
        _ => "\n",
    }
}

/// Drop a leading `{: .lead}` / `<!--break-->` marker from a post body
pub fn strip_lead_break(body: &str) -> &str {
    match LEAD_BREAK.find(body) {
        Some(m) => &body[m.end()..],
        None => body,
    }
}

/// Applies the body rewrites expected by the site theme
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownNormalizer;

impl MarkdownNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Fix heading spacing, then separate a leading reference-style image
    pub fn normalize(&self, body: &str) -> String {
        let fixed = self.fix_header_syntax(body);
        self.separate_leading_image(&fixed)
    }

    /// Insert a single space after a run of one to six `#` glued to its text.
    ///
    /// Lines inside fenced code blocks are left alone.
    pub fn fix_header_syntax(&self, body: &str) -> String {
        let mut out = String::with_capacity(body.len() + 16);
        let mut fence: Option<char> = None;

        for line in lines_inclusive(body) {
            if let Some(marker) = fence_marker(line) {
                match fence {
                    None => fence = Some(marker),
                    Some(open) if open == marker => fence = None,
                    Some(_) => {}
                }
                out.push_str(line);
                continue;
            }

            if fence.is_none() {
                out.push_str(&HEADING.replace(line, "$1 $2"));
            } else {
                out.push_str(line);
            }
        }

        out
    }

    /// Prefix a blank line when the body opens with a reference-style image.
    ///
    /// The blank line uses the body's own line ending. Only the start of the
    /// body is inspected.
    pub fn separate_leading_image(&self, body: &str) -> String {
        if LEADING_REFERENCE_IMAGE.is_match(body) {
            format!("{}{}", line_ending_of(body), body)
        } else {
            body.to_string()
        }
    }
}

/// The fence character when `line` opens or closes a fenced code block
fn fence_marker(line: &str) -> Option<char> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let text = &line[indent..];
    if text.starts_with("```") {
        Some('`')
    } else if text.starts_with("~~~") {
        Some('~')
    } else {
        None
    }
}
