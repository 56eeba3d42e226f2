//! Generic HTML handling for post bodies.
//!
//! Converts post HTML into the plain text the analytics engine reads, and
//! picks up standard `<meta>` hints (Open Graph, `author`, article times)
//! that help build a [`PostSummary`] for a saved page. Nothing here knows
//! about a particular site's markup.
//!
//! # Example
//!
//! ```rust
//! use stackscope_core::parse::Document;
//!
//! let doc = Document::parse("<html><head><title>Hi</title></head><body><p>One.</p><p>Two.</p></body></html>");
//! assert_eq!(doc.title(), Some("Hi".to_string()));
//! assert_eq!(doc.text_content(), "One.\n\nTwo.");
//! ```

use scraper::{ElementRef, Html, Selector};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::models::{PostContent, PostSummary};

const BLOCK_ELEMENTS: [&str; 19] = [
    "p",
    "div",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "li",
    "blockquote",
    "pre",
    "td",
    "th",
    "article",
    "section",
    "figcaption",
    "header",
    "footer",
    "body",
];

const SKIPPED_ELEMENTS: [&str; 6] = ["head", "script", "style", "noscript", "template", "svg"];

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

/// Summary fields recovered from standard `<meta>` tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaHints {
    pub title: Option<String>,
    pub author: Option<String>,
    pub excerpt: Option<String>,
    pub published_at: Option<OffsetDateTime>,
}

impl MetaHints {
    /// Fills empty fields of `summary` from these hints.
    pub fn apply_to(self, summary: &mut PostSummary) {
        if summary.author.is_none() {
            summary.author = self.author;
        }
        if summary.excerpt.is_none() {
            summary.excerpt = self.excerpt;
        }
        if summary.published_at.is_none() {
            summary.published_at = self.published_at;
        }
    }
}

impl Document {
    /// Parses HTML from a string. Malformed markup is repaired, never rejected.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Gets the content of the `<title>` element, if present and non-blank.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Gets the `content` of the first `<meta>` whose `name` or `property` is `key`.
    pub fn meta_content(&self, key: &str) -> Option<String> {
        let selector = Selector::parse("meta").ok()?;
        self.html
            .select(&selector)
            .filter(|el| el.value().attr("name") == Some(key) || el.value().attr("property") == Some(key))
            .find_map(|el| el.value().attr("content"))
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
    }

    /// Collects title, author, description and publication time hints.
    ///
    /// Open Graph values win over plain meta tags; the title falls back to
    /// `<title>`. Unparseable timestamps are dropped.
    pub fn meta_hints(&self) -> MetaHints {
        let title = self.meta_content("og:title").or_else(|| self.title());
        let author = self.meta_content("author").or_else(|| self.meta_content("article:author"));
        let excerpt = self.meta_content("og:description").or_else(|| self.meta_content("description"));
        let published_at = self
            .meta_content("article:published_time")
            .and_then(|raw| OffsetDateTime::parse(&raw, &Rfc3339).ok());

        MetaHints { title, author, excerpt, published_at }
    }

    /// Gets the readable text of the document.
    ///
    /// Text inside `<head>`, scripts and styles is skipped. Whitespace is
    /// collapsed inside each block element and blocks are separated by a
    /// blank line.
    pub fn text_content(&self) -> String {
        let mut blocks: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_block = None;

        for node in self.html.root_element().descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };

            let mut block = None;
            let mut skipped = false;
            for ancestor in node.ancestors() {
                if let Some(el) = ElementRef::wrap(ancestor) {
                    let name = el.value().name();
                    if SKIPPED_ELEMENTS.contains(&name) {
                        skipped = true;
                        break;
                    }
                    if block.is_none() && BLOCK_ELEMENTS.contains(&name) {
                        block = Some(ancestor.id());
                    }
                }
            }
            if skipped {
                continue;
            }

            if block != current_block {
                flush_block(&mut blocks, &mut current);
                current_block = block;
            }
            current.push_str(text);
        }
        flush_block(&mut blocks, &mut current);

        blocks.join("\n\n")
    }
}

fn flush_block(blocks: &mut Vec<String>, current: &mut String) {
    let collapsed = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !collapsed.is_empty() {
        blocks.push(collapsed);
    }
    current.clear();
}

impl PostContent {
    /// Derives the plain-text body from `html` when `text` is absent.
    ///
    /// Returns `true` when text was filled in.
    pub fn fill_text_from_html(&mut self) -> bool {
        if self.text.is_none()
            && let Some(html) = &self.html
        {
            self.text = Some(Document::parse(html).text_content());
            return true;
        }
        false
    }
}
