//! Data model for posts, history entries and the analytics record.
//!
//! [`PostContent`] and [`PostSummary`] are inputs supplied by a collaborator
//! (a feed reader, a scraper, or the file loaders in [`crate::fetch`]).
//! [`ContentAnalytics`] is the immutable output of [`crate::Analyzer`].
//!
//! Optional values that could not be computed are omitted from serialized
//! output rather than written as `null` or zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use url::Url;

/// Keys written into [`ContentAnalytics::extra`].
pub mod extra_keys {
    pub const WORD_COUNT: &str = "word_count";
    pub const SENTENCE_COUNT: &str = "sentence_count";
    pub const SYLLABLE_COUNT: &str = "syllable_count";
    pub const GENERATED_AT: &str = "generated_at";
}

/// Minimal identity of a Substack publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationRef {
    /// Substack handle, e.g. `littlehakr`.
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
}

/// Summary of a post as found in a feed or index page.
///
/// Also used as a history entry for cadence estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Stable identifier if the source exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub url: Url,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub published_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication: Option<PublicationRef>,
}

impl PostSummary {
    /// Creates a summary with only the required fields set.
    pub fn new(title: impl Into<String>, url: Url) -> Self {
        Self {
            id: None,
            title: title.into(),
            url,
            published_at: None,
            updated_at: None,
            author: None,
            excerpt: None,
            tags: Vec::new(),
            publication: None,
        }
    }

    /// Sets the publication timestamp.
    pub fn published_at(mut self, at: OffsetDateTime) -> Self {
        self.published_at = Some(at);
        self
    }
}

/// Full content for a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostContent {
    pub summary: PostSummary,
    /// Plain text body. The analytics engine reads only this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Canonical HTML as served by the site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<Url>,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Word count reported by the source, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    /// Minutes-to-read estimate reported by the source, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute_read: Option<u32>,
}

impl PostContent {
    /// Creates content from a summary and a plain-text body.
    pub fn from_text(summary: PostSummary, text: impl Into<String>) -> Self {
        Self {
            summary,
            text: Some(text.into()),
            html: None,
            cover_image: None,
            topics: Vec::new(),
            word_count: None,
            minute_read: None,
        }
    }

    /// The text the engine analyses: the body, or an empty string when absent.
    pub fn body_text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// VADER polarity scores for a body of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    /// Normalized overall polarity in `[-1, 1]`.
    pub compound: f64,
}

/// A keyword and its share of all qualifying token occurrences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    pub term: String,
    pub score: f64,
}

/// Analytics derived from a single post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalytics {
    pub summary: PostSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentBreakdown>,
    /// Ordered by descending frequency; ties keep first-seen order.
    #[serde(default)]
    pub keywords: Vec<KeywordScore>,
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexical_diversity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_sentence_length: Option<f64>,
    /// Mean days between posts in the supplied history window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishing_cadence_days: Option<f64>,
    /// Diagnostic counters and the generation timestamp.
    #[serde(default)]
    pub extra: BTreeMap<String, Value>,
}

impl ContentAnalytics {
    /// Number of word tokens in the analysed text.
    pub fn word_count(&self) -> Option<u64> {
        self.extra.get(extra_keys::WORD_COUNT).and_then(Value::as_u64)
    }

    /// Literal number of non-empty sentence segments.
    pub fn sentence_count(&self) -> Option<u64> {
        self.extra.get(extra_keys::SENTENCE_COUNT).and_then(Value::as_u64)
    }

    pub fn syllable_count(&self) -> Option<u64> {
        self.extra.get(extra_keys::SYLLABLE_COUNT).and_then(Value::as_u64)
    }

    /// RFC 3339 timestamp of when the record was built.
    pub fn generated_at(&self) -> Option<&str> {
        self.extra.get(extra_keys::GENERATED_AT).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn summary() -> PostSummary {
        PostSummary::new("Sample", Url::parse("https://example.substack.com/p/sample").unwrap())
    }

    #[test]
    fn test_summary_deserializes_minimal_json() {
        let json = r#"{"title":"Sample","url":"https://example.substack.com/p/sample"}"#;
        let parsed: PostSummary = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, summary());
        assert!(parsed.tags.is_empty());
    }

    #[test]
    fn test_summary_timestamp_is_rfc3339() {
        let s = summary().published_at(datetime!(2024-03-01 12:00 UTC));
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains(r#""published_at":"2024-03-01T12:00:00Z""#));
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let json = serde_json::to_value(summary()).unwrap();
        assert!(json.get("published_at").is_none());
        assert!(json.get("author").is_none());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_body_text_defaults_to_empty() {
        let mut content = PostContent::from_text(summary(), "Body");
        assert_eq!(content.body_text(), "Body");
        content.text = None;
        assert_eq!(content.body_text(), "");
    }

    #[test]
    fn test_content_analytics_extra_accessors() {
        let mut extra = BTreeMap::new();
        extra.insert(extra_keys::WORD_COUNT.to_string(), Value::from(11u64));
        extra.insert(extra_keys::SENTENCE_COUNT.to_string(), Value::from(2u64));
        extra.insert(extra_keys::GENERATED_AT.to_string(), Value::from("2024-01-01T00:00:00Z"));

        let analytics = ContentAnalytics {
            summary: summary(),
            sentiment: None,
            keywords: Vec::new(),
            flesch_reading_ease: 0.0,
            flesch_kincaid_grade: 0.0,
            lexical_diversity: None,
            average_sentence_length: None,
            publishing_cadence_days: None,
            extra,
        };

        assert_eq!(analytics.word_count(), Some(11));
        assert_eq!(analytics.sentence_count(), Some(2));
        assert_eq!(analytics.syllable_count(), None);
        assert_eq!(analytics.generated_at(), Some("2024-01-01T00:00:00Z"));

        let json = serde_json::to_value(&analytics).unwrap();
        assert!(json.get("sentiment").is_none());
        assert!(json.get("lexical_diversity").is_none());
        assert_eq!(json["flesch_reading_ease"], 0.0);
    }
}
