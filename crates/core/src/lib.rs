pub mod analyze;
pub mod cadence;
pub mod error;
pub mod fetch;
pub mod formatters;
pub mod keywords;
pub mod models;
#[cfg(feature = "html")]
pub mod parse;
pub mod readability;
pub mod sentiment;
pub mod tokenize;

pub use analyze::{AnalyticsConfig, AnalyticsConfigBuilder, Analyzer, analyse_post};
pub use cadence::publishing_cadence_days;
pub use error::{Result, StackscopeError};
pub use fetch::{InputKind, PostSource, fetch_file, fetch_stdin, load_history, load_posts};
pub use formatters::{JsonConfig, JsonFormatter, MarkdownConfig, MarkdownFormatter, TextConfig, TextFormatter};
pub use formatters::{analytics_to_json, analytics_to_toml, batch_to_json, convert_to_markdown, convert_to_text};
pub use keywords::extract_keywords;
pub use models::{ContentAnalytics, KeywordScore, PostContent, PostSummary, PublicationRef, SentimentBreakdown};
#[cfg(feature = "html")]
pub use parse::{Document, MetaHints};
pub use readability::{ReadabilityScores, count_syllables, flesch_kincaid_grade, flesch_reading_ease};
pub use sentiment::{SentimentScorer, VaderScorer, score_sentiment};
pub use tokenize::{sentence_lengths, tokenise};
