use serde::Serialize;
use time::format_description::well_known::Rfc3339;

use crate::models::{ContentAnalytics, KeywordScore, SentimentBreakdown};
use crate::{Result, StackscopeError};

/// Configuration for JSON output
#[derive(Debug, Clone)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
    /// Emit the compact digest instead of the full record
    pub digest: bool,
    /// Keywords kept in a digest
    pub digest_keywords: usize,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { pretty: false, digest: false, digest_keywords: 10 }
    }
}

/// Compact per-post summary for conversational clients.
///
/// Unlike the full record, absent sentiment and cadence are written as
/// `null` so the shape is fixed.
#[derive(Debug, Clone, Serialize)]
pub struct Digest<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub published: Option<String>,
    pub sentiment: Option<DigestSentiment>,
    pub readability: DigestReadability,
    pub keywords: &'a [KeywordScore],
    pub publishing_cadence_days: Option<f64>,
    pub word_count: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DigestSentiment {
    pub compound: f64,
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl From<&SentimentBreakdown> for DigestSentiment {
    fn from(s: &SentimentBreakdown) -> Self {
        Self { compound: s.compound, positive: s.positive, neutral: s.neutral, negative: s.negative }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DigestReadability {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub lexical_diversity: Option<f64>,
    pub average_sentence_length: Option<f64>,
}

impl<'a> Digest<'a> {
    pub fn new(analytics: &'a ContentAnalytics, keyword_limit: usize) -> Self {
        let summary = &analytics.summary;
        let keywords = &analytics.keywords[..analytics.keywords.len().min(keyword_limit)];

        Self {
            title: &summary.title,
            url: summary.url.as_str(),
            published: summary.published_at.and_then(|at| at.format(&Rfc3339).ok()),
            sentiment: analytics.sentiment.as_ref().map(DigestSentiment::from),
            readability: DigestReadability {
                flesch_reading_ease: analytics.flesch_reading_ease,
                flesch_kincaid_grade: analytics.flesch_kincaid_grade,
                lexical_diversity: analytics.lexical_diversity,
                average_sentence_length: analytics.average_sentence_length,
            },
            keywords,
            publishing_cadence_days: analytics.publishing_cadence_days,
            word_count: analytics.word_count(),
        }
    }
}

fn to_string<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let out = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    out.map_err(|e| StackscopeError::Serialize(e.to_string()))
}

/// Convert one analytics record to JSON
pub fn analytics_to_json(analytics: &ContentAnalytics, config: &JsonConfig) -> Result<String> {
    if config.digest {
        to_string(&Digest::new(analytics, config.digest_keywords), config.pretty)
    } else {
        to_string(analytics, config.pretty)
    }
}

/// Convert a batch of analytics records to a JSON array
pub fn batch_to_json(items: &[ContentAnalytics], config: &JsonConfig) -> Result<String> {
    if config.digest {
        let digests: Vec<Digest<'_>> = items.iter().map(|a| Digest::new(a, config.digest_keywords)).collect();
        to_string(&digests, config.pretty)
    } else {
        to_string(items, config.pretty)
    }
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, analytics: &ContentAnalytics) -> Result<String> {
        analytics_to_json(analytics, &self.config)
    }

    pub fn convert_all(&self, items: &[ContentAnalytics]) -> Result<String> {
        batch_to_json(items, &self.config)
    }
}
