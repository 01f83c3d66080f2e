//! Readable-text extraction from HTML pages.
//!
//! Regex-based rather than a full DOM parse: pick the most specific content
//! container (`<main>`, then `<article>`, then `<body>`), drop non-content
//! elements, turn block boundaries into newlines, strip the remaining tags and
//! decode entities.

use regex::Regex;

/// Elements whose content is never readable text.
const DROPPED_ELEMENTS: [&str; 6] = ["script", "style", "noscript", "svg", "head", "template"];

/// Content containers, most specific first.
const CONTAINERS: [&str; 3] = ["main", "article", "body"];

const BLOCK_TAG_PATTERN: &str = r"(?i)<\s*/?\s*(?:p|div|br|hr|li|ul|ol|dl|dt|dd|h[1-6]|tr|td|th|table|section|article|header|footer|nav|aside|blockquote|pre|figure|figcaption|form|main)\b[^>]*>";

/// Compiled extraction patterns. Build once and reuse.
#[derive(Debug)]
pub struct TextExtractor {
    comments: Regex,
    dropped: Vec<Regex>,
    containers: Vec<Regex>,
    block_tags: Regex,
    any_tag: Regex,
    spaces: Regex,
}

impl TextExtractor {
    /// Compile the extraction patterns.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        let dropped = DROPPED_ELEMENTS
            .iter()
            .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")))
            .collect::<Result<Vec<_>, _>>()?;
        let containers = CONTAINERS
            .iter()
            .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>(.*)</{tag}\s*>")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            comments: Regex::new(r"(?s)<!--.*?-->")?,
            dropped,
            containers,
            block_tags: Regex::new(BLOCK_TAG_PATTERN)?,
            any_tag: Regex::new(r"(?s)<[^>]*>")?,
            spaces: Regex::new(r"[ \t\u{a0}]+")?,
        })
    }

    /// Extract readable text from an HTML document.
    ///
    /// Lines are trimmed and blank lines removed. Returns an empty string if
    /// the page has no text content.
    #[must_use]
    pub fn extract(&self, html: &str) -> String {
        let mut doc = self.comments.replace_all(html, " ").into_owned();
        for pattern in &self.dropped {
            doc = pattern.replace_all(&doc, " ").into_owned();
        }

        let content = self
            .containers
            .iter()
            .find_map(|pattern| pattern.captures(&doc))
            .and_then(|caps| caps.get(1))
            .map_or(doc.as_str(), |m| m.as_str());

        let text = self.block_tags.replace_all(content, "\n");
        let text = self.any_tag.replace_all(&text, "");
        let text = html_escape::decode_html_entities(&text);

        text.lines()
            .map(|line| self.spaces.replace_all(line, " ").trim().to_string())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Whether a response body should be treated as HTML.
#[must_use]
pub fn looks_like_html(content_type: Option<&str>, body: &str) -> bool {
    if let Some(ct) = content_type {
        let ct = ct.to_ascii_lowercase();
        if ct.contains("html") || ct.contains("xml") {
            return true;
        }
        if ct.starts_with("text/") || ct.contains("json") {
            return false;
        }
    }
    body.trim_start().starts_with('<')
}
