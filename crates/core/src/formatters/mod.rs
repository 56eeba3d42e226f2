pub mod json;
pub mod markdown;
pub mod text;
pub mod toml;

pub use json::{JsonConfig, JsonFormatter, analytics_to_json, batch_to_json};
pub use markdown::{MarkdownConfig, MarkdownFormatter, convert_to_markdown};
pub use text::{TextConfig, TextFormatter, convert_to_text};
pub use toml::analytics_to_toml;

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;

    use serde_json::Value;
    use time::macros::datetime;
    use url::Url;

    use crate::models::{ContentAnalytics, KeywordScore, PostSummary, SentimentBreakdown, extra_keys};

    pub(crate) fn sample_analytics() -> ContentAnalytics {
        let mut summary = PostSummary::new("Sample Post", Url::parse("https://example.substack.com/p/sample").unwrap())
            .published_at(datetime!(2024-03-01 12:00 UTC));
        summary.author = Some("Jane Writer".to_string());
        summary.tags = vec!["rust".to_string(), "writing".to_string()];

        let keywords = [("rust", 0.25), ("writing", 0.125), ("analytics", 0.125)]
            .into_iter()
            .map(|(term, score)| KeywordScore { term: term.to_string(), score })
            .collect();

        let extra = BTreeMap::from([
            (extra_keys::WORD_COUNT.to_string(), Value::from(10u64)),
            (extra_keys::SENTENCE_COUNT.to_string(), Value::from(2u64)),
            (extra_keys::SYLLABLE_COUNT.to_string(), Value::from(15u64)),
            (extra_keys::GENERATED_AT.to_string(), Value::from("2024-03-02T00:00:00Z")),
        ]);

        ContentAnalytics {
            summary,
            sentiment: Some(SentimentBreakdown { negative: 0.1, neutral: 0.6, positive: 0.3, compound: 0.42 }),
            keywords,
            flesch_reading_ease: 61.3312,
            flesch_kincaid_grade: 8.4,
            lexical_diversity: Some(0.8),
            average_sentence_length: Some(5.0),
            publishing_cadence_days: Some(3.5),
            extra,
        }
    }
}
