//! Loading posts and history from local files and stdin.
//!
//! Input comes in three shapes: a serialized [`PostContent`] (or a JSON array
//! of them), a saved HTML page, or a plain-text body. For HTML and text the
//! [`PostSummary`] is assembled from a [`PostSource`] supplied by the caller.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;
use time::OffsetDateTime;
use url::Url;

use crate::models::{PostContent, PostSummary};
use crate::{Result, StackscopeError};

const UNTITLED: &str = "Untitled";

/// Reads content from a local file.
pub fn fetch_file(path: impl AsRef<Path>) -> Result<String> {
    let path_buf = path.as_ref().to_path_buf();

    if !path_buf.exists() {
        Err(StackscopeError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(StackscopeError::from)
    }
}

/// Reads all of standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    Ok(buffer)
}

/// The shape of a post input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A `PostContent` object or an array of them.
    Json,
    /// A saved HTML page.
    Html,
    /// A plain-text body.
    Text,
}

impl FromStr for InputKind {
    type Err = StackscopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "html" | "htm" => Ok(Self::Html),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(StackscopeError::ConfigError(format!(
                "Invalid input format: {}. Valid options: json, html, text",
                s
            ))),
        }
    }
}

impl InputKind {
    /// Maps a file extension to an input kind.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            "txt" | "text" | "md" => Some(Self::Text),
            _ => None,
        }
    }

    /// Guesses the kind from the first non-blank character of the content.
    pub fn sniff(raw: &str) -> Self {
        match raw.trim_start().chars().next() {
            Some('{') | Some('[') => Self::Json,
            Some('<') => Self::Html,
            _ => Self::Text,
        }
    }

    /// Whether `raw` holds several posts, i.e. is a JSON array.
    ///
    /// Holds for a one-element array too, so callers can keep the output
    /// shape equal to the input shape.
    pub fn is_batch(self, raw: &str) -> bool {
        self == Self::Json && raw.trim_start().starts_with('[')
    }

    /// Uses the extension when it is recognised, otherwise sniffs the content.
    pub fn detect(path: Option<&Path>, raw: &str) -> Self {
        path.and_then(Self::from_extension).unwrap_or_else(|| Self::sniff(raw))
    }
}

/// Caller-supplied summary fields for HTML and plain-text input.
#[derive(Debug, Clone, PartialEq)]
pub struct PostSource {
    pub url: Url,
    pub title: Option<String>,
    pub published_at: Option<OffsetDateTime>,
}

impl PostSource {
    pub fn new(url: Url) -> Self {
        Self { url, title: None, published_at: None }
    }

    /// A source whose URL points at a local file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let absolute = fs::canonicalize(path)?;
        let url = Url::from_file_path(&absolute)
            .map_err(|_| StackscopeError::InvalidUrl(format!("cannot express {} as a URL", absolute.display())))?;
        let title = path.file_stem().and_then(|s| s.to_str()).map(str::to_string);
        Ok(Self { url, title, published_at: None })
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn published_at(mut self, at: OffsetDateTime) -> Self {
        self.published_at = Some(at);
        self
    }

    fn summary(&self, fallback_title: Option<String>) -> PostSummary {
        let title = self.title.clone().or(fallback_title).unwrap_or_else(|| UNTITLED.to_string());
        let mut summary = PostSummary::new(title, self.url.clone());
        summary.published_at = self.published_at;
        summary
    }
}

/// Builds one or more posts from raw input.
///
/// JSON input is taken as-is and may hold several posts; HTML and text
/// always produce exactly one.
pub fn load_posts(raw: &str, kind: InputKind, source: &PostSource) -> Result<Vec<PostContent>> {
    if raw.trim().is_empty() {
        return Err(StackscopeError::InvalidInput("input is empty".to_string()));
    }

    let posts = match kind {
        InputKind::Json => parse_post_json(raw)?,
        InputKind::Html => vec![post_from_html(raw, source)],
        InputKind::Text => vec![PostContent::from_text(source.summary(None), raw)],
    };

    tracing::debug!(?kind, posts = posts.len(), "posts loaded");
    Ok(posts)
}

fn parse_post_json(raw: &str) -> Result<Vec<PostContent>> {
    let value: Value = serde_json::from_str(raw)?;
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                return Err(StackscopeError::InvalidInput("post array is empty".to_string()));
            }
            items.into_iter().map(|item| serde_json::from_value(item).map_err(StackscopeError::from)).collect()
        }
        Value::Object(_) => Ok(vec![serde_json::from_value(value)?]),
        _ => Err(StackscopeError::InvalidInput("expected a post object or an array of posts".to_string())),
    }
}

#[cfg(feature = "html")]
fn post_from_html(raw: &str, source: &PostSource) -> PostContent {
    let doc = crate::parse::Document::parse(raw);
    let hints = doc.meta_hints();
    let mut summary = source.summary(hints.title.clone());
    hints.apply_to(&mut summary);

    let mut content = PostContent::from_text(summary, doc.text_content());
    content.html = Some(raw.to_string());
    content
}

#[cfg(not(feature = "html"))]
fn post_from_html(raw: &str, source: &PostSource) -> PostContent {
    let mut content = PostContent::from_text(source.summary(None), String::new());
    content.text = None;
    content.html = Some(raw.to_string());
    content
}

/// Parses a history window: a JSON array of post summaries.
pub fn load_history(raw: &str) -> Result<Vec<PostSummary>> {
    if raw.trim().is_empty() {
        return Err(StackscopeError::InvalidInput("history is empty".to_string()));
    }
    let history: Vec<PostSummary> = serde_json::from_str(raw)?;
    tracing::debug!(entries = history.len(), "history loaded");
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn source() -> PostSource {
        PostSource::new(Url::parse("https://example.substack.com/p/sample").unwrap())
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/post.json");
        assert!(matches!(result, Err(StackscopeError::FileNotFound(_))));
    }

    #[test]
    fn test_fetch_file_reads_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Hello there.").unwrap();
        let content = fetch_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(content, "Hello there.");
    }

    #[test]
    fn test_fetch_file_accepts_paths() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        assert_eq!(fetch_file(file.path()).unwrap(), "");
    }

    #[test]
    fn test_input_kind_is_batch() {
        assert!(InputKind::Json.is_batch("  [{\"a\": 1}]"));
        assert!(!InputKind::Json.is_batch("{\"a\": 1}"));
        assert!(!InputKind::Text.is_batch("[draft] notes"));
    }

    #[test]
    fn test_input_kind_from_str() {
        assert_eq!("JSON".parse::<InputKind>().unwrap(), InputKind::Json);
        assert_eq!("htm".parse::<InputKind>().unwrap(), InputKind::Html);
        assert_eq!("txt".parse::<InputKind>().unwrap(), InputKind::Text);
        assert!(matches!("pdf".parse::<InputKind>(), Err(StackscopeError::ConfigError(_))));
    }

    #[test]
    fn test_input_kind_detect() {
        assert_eq!(InputKind::detect(Some(Path::new("post.html")), "plain"), InputKind::Html);
        assert_eq!(InputKind::detect(Some(Path::new("post.dat")), "  [1]"), InputKind::Json);
        assert_eq!(InputKind::detect(None, "<p>hi</p>"), InputKind::Html);
        assert_eq!(InputKind::detect(None, "Just words."), InputKind::Text);
    }

    #[test]
    fn test_load_text_post() {
        let posts = load_posts("Hello world.", InputKind::Text, &source().title("Greeting")).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].summary.title, "Greeting");
        assert_eq!(posts[0].text.as_deref(), Some("Hello world."));
    }

    #[test]
    fn test_load_text_post_untitled() {
        let posts = load_posts("Hello world.", InputKind::Text, &source()).unwrap();
        assert_eq!(posts[0].summary.title, UNTITLED);
    }

    #[test]
    fn test_load_empty_input_rejected() {
        let result = load_posts("  \n", InputKind::Text, &source());
        assert!(matches!(result, Err(StackscopeError::InvalidInput(_))));
    }

    #[test]
    fn test_load_json_object_and_array() {
        let one = r#"{"summary":{"title":"A","url":"https://example.com/p/a"},"text":"Body"}"#;
        let posts = load_posts(one, InputKind::Json, &source()).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].summary.title, "A");

        let many = format!("[{one},{one}]");
        assert_eq!(load_posts(&many, InputKind::Json, &source()).unwrap().len(), 2);
    }

    #[test]
    fn test_load_json_errors() {
        assert!(matches!(load_posts("[]", InputKind::Json, &source()), Err(StackscopeError::InvalidInput(_))));
        assert!(matches!(load_posts("42", InputKind::Json, &source()), Err(StackscopeError::InvalidInput(_))));
        assert!(matches!(load_posts("{", InputKind::Json, &source()), Err(StackscopeError::InvalidJson(_))));
        assert!(matches!(load_posts(r#"{"text":"x"}"#, InputKind::Json, &source()), Err(StackscopeError::InvalidJson(_))));
    }

    #[cfg(feature = "html")]
    #[test]
    fn test_load_html_post() {
        let html = r#"<html><head><title>Saved Page</title><meta name="author" content="Ann"></head>
            <body><p>First paragraph.</p><p>Second one.</p></body></html>"#;
        let posts = load_posts(html, InputKind::Html, &source()).unwrap();
        let post = &posts[0];
        assert_eq!(post.summary.title, "Saved Page");
        assert_eq!(post.summary.author.as_deref(), Some("Ann"));
        assert_eq!(post.text.as_deref(), Some("First paragraph.\n\nSecond one."));
        assert!(post.html.is_some());
    }

    #[cfg(feature = "html")]
    #[test]
    fn test_explicit_title_beats_html_title() {
        let html = "<html><head><title>Saved Page</title></head><body><p>x</p></body></html>";
        let posts = load_posts(html, InputKind::Html, &source().title("Mine")).unwrap();
        assert_eq!(posts[0].summary.title, "Mine");
    }

    #[test]
    fn test_post_source_from_path() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let source = PostSource::from_path(file.path()).unwrap();
        assert_eq!(source.url.scheme(), "file");
        assert!(source.title.is_some());
    }

    #[test]
    fn test_load_history() {
        let raw = r#"[
            {"title":"A","url":"https://example.com/p/a","published_at":"2024-01-01T00:00:00Z"},
            {"title":"B","url":"https://example.com/p/b"}
        ]"#;
        let history = load_history(raw).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].published_at.is_some());
        assert!(history[1].published_at.is_none());
    }

    #[test]
    fn test_load_history_errors() {
        assert!(matches!(load_history(""), Err(StackscopeError::InvalidInput(_))));
        assert!(matches!(load_history(r#"{"title":"A"}"#), Err(StackscopeError::InvalidJson(_))));
    }
}
