//! Main analytics API.
//!
//! The entry point is [`Analyzer`], which turns a [`PostContent`] (and an
//! optional window of post history) into a [`ContentAnalytics`] record in a
//! single pass. Analysis is synchronous and keeps no state between calls, so
//! one `Analyzer` can be shared across threads.
//!
//! # Example
//!
//! ```rust
//! use stackscope_core::{Analyzer, PostContent, PostSummary};
//! use url::Url;
//!
//! let summary = PostSummary::new("Sample", Url::parse("https://example.substack.com/p/sample").unwrap());
//! let content = PostContent::from_text(summary, "Hello world. This is a simple test post for analytics.");
//!
//! let analytics = Analyzer::new().analyse(&content, None);
//! assert_eq!(analytics.word_count(), Some(10));
//! assert!(analytics.sentiment.is_some());
//! ```

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::cadence::publishing_cadence_days;
use crate::keywords::extract_keywords;
use crate::models::{ContentAnalytics, PostContent, PostSummary, extra_keys};
use crate::readability::{ReadabilityScores, count_syllables};
use crate::sentiment::{SentimentScorer, VaderScorer, score_sentiment};
use crate::tokenize::{sentence_lengths, tokenise};

/// Configuration for the analytics engine.
///
/// # Example
///
/// ```rust
/// use stackscope_core::AnalyticsConfig;
///
/// let config = AnalyticsConfig::builder()
///     .top_keywords(5)
///     .min_keyword_length(4)
///     .build();
/// assert_eq!(config.top_keywords, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
    /// Number of keywords to return (default: 12).
    pub top_keywords: usize,

    /// Minimum token length for a keyword (default: 3).
    pub min_keyword_length: usize,

    /// Whether to run sentiment scoring (default: true).
    pub sentiment: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self { top_keywords: 12, min_keyword_length: 3, sentiment: true }
    }
}

impl AnalyticsConfig {
    /// Creates a new builder for AnalyticsConfig.
    pub fn builder() -> AnalyticsConfigBuilder {
        AnalyticsConfigBuilder::new()
    }
}

/// Builder for AnalyticsConfig.
pub struct AnalyticsConfigBuilder {
    config: AnalyticsConfig,
}

impl AnalyticsConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AnalyticsConfig::default() }
    }

    /// Sets the number of keywords to return.
    pub fn top_keywords(mut self, value: usize) -> Self {
        self.config.top_keywords = value;
        self
    }

    /// Sets the minimum keyword length.
    pub fn min_keyword_length(mut self, value: usize) -> Self {
        self.config.min_keyword_length = value;
        self
    }

    /// Sets whether sentiment is scored.
    pub fn sentiment(mut self, value: bool) -> Self {
        self.config.sentiment = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> AnalyticsConfig {
        self.config
    }
}

impl Default for AnalyticsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The content analytics engine.
///
/// Holds a configuration and a shared [`SentimentScorer`]; both are read-only
/// after construction.
#[derive(Clone)]
pub struct Analyzer {
    config: AnalyticsConfig,
    scorer: Arc<dyn SentimentScorer>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Creates an analyzer with default settings and the VADER scorer.
    pub fn new() -> Self {
        Self::with_config(AnalyticsConfig::default())
    }

    /// Creates an analyzer with custom configuration and the VADER scorer.
    pub fn with_config(config: AnalyticsConfig) -> Self {
        Self::with_scorer(config, VaderScorer::shared())
    }

    /// Creates an analyzer with a caller-supplied sentiment scorer.
    pub fn with_scorer(config: AnalyticsConfig, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { config, scorer }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Runs keyword, sentiment, readability and cadence analytics for a post.
    ///
    /// `history` is the window used for cadence; it may or may not include
    /// the post itself. Never fails: degenerate input produces `0.0`
    /// readability sentinels and absent optional fields.
    pub fn analyse(&self, content: &PostContent, history: Option<&[PostSummary]>) -> ContentAnalytics {
        let text = content.body_text();
        let tokens = tokenise(text);
        let word_count = tokens.len();
        let sentences = sentence_lengths(text);
        let sentence_count = sentences.len();
        let syllable_count: usize = tokens.iter().map(|t| count_syllables(t)).sum();

        // ratios never divide by zero sentences; extra reports the literal count
        let readability = ReadabilityScores::from_counts(word_count, sentence_count.max(1), syllable_count);

        let sentiment = if self.config.sentiment { score_sentiment(self.scorer.as_ref(), text) } else { None };

        let keywords = extract_keywords(&tokens, self.config.top_keywords, self.config.min_keyword_length);

        let lexical_diversity = if word_count > 0 {
            let distinct: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            Some(distinct.len() as f64 / word_count as f64)
        } else {
            None
        };

        let average_sentence_length = if sentences.is_empty() {
            None
        } else {
            Some(sentences.iter().sum::<usize>() as f64 / sentence_count as f64)
        };

        let publishing_cadence_days = history.and_then(publishing_cadence_days);

        tracing::debug!(
            title = %content.summary.title,
            word_count,
            sentence_count,
            syllable_count,
            keywords = keywords.len(),
            "post analysed"
        );

        ContentAnalytics {
            summary: content.summary.clone(),
            sentiment,
            keywords,
            flesch_reading_ease: readability.flesch_reading_ease,
            flesch_kincaid_grade: readability.flesch_kincaid_grade,
            lexical_diversity,
            average_sentence_length,
            publishing_cadence_days,
            extra: build_extra(word_count, sentence_count, syllable_count),
        }
    }

    /// Analyses a batch of posts, preserving input order.
    ///
    /// When `history` is `None`, the batch's own summaries form the cadence
    /// window for every post.
    pub fn analyse_all(&self, contents: &[PostContent], history: Option<&[PostSummary]>) -> Vec<ContentAnalytics> {
        let own_history: Vec<PostSummary>;
        let window = match history {
            Some(h) => h,
            None => {
                own_history = contents.iter().map(|c| c.summary.clone()).collect();
                &own_history
            }
        };
        contents.iter().map(|content| self.analyse(content, Some(window))).collect()
    }
}

fn build_extra(word_count: usize, sentence_count: usize, syllable_count: usize) -> BTreeMap<String, Value> {
    let now = OffsetDateTime::now_utc();
    let generated_at = now.format(&Rfc3339).unwrap_or_else(|_| now.unix_timestamp().to_string());

    BTreeMap::from([
        (extra_keys::WORD_COUNT.to_string(), Value::from(word_count)),
        (extra_keys::SENTENCE_COUNT.to_string(), Value::from(sentence_count)),
        (extra_keys::SYLLABLE_COUNT.to_string(), Value::from(syllable_count)),
        (extra_keys::GENERATED_AT.to_string(), Value::from(generated_at)),
    ])
}

/// Analyses a post with a default [`Analyzer`].
pub fn analyse_post(content: &PostContent, history: Option<&[PostSummary]>) -> ContentAnalytics {
    Analyzer::new().analyse(content, history)
}
