use crate::formatters::toml::analytics_to_toml;
use crate::models::ContentAnalytics;

/// Configuration for Markdown reports
#[derive(Debug, Clone, Default)]
pub struct MarkdownConfig {
    /// Include TOML frontmatter with headline figures
    pub include_frontmatter: bool,
}

/// Render an analytics record as a Markdown report
pub fn convert_to_markdown(analytics: &ContentAnalytics, config: &MarkdownConfig) -> String {
    let mut output = String::new();

    if config.include_frontmatter {
        output.push_str("+++\n");
        output.push_str(&analytics_to_toml(analytics));
        output.push_str("+++\n\n");
    }

    let summary = &analytics.summary;
    output.push_str(&format!("# [{}]({})\n\n", escape_brackets(&summary.title), summary.url));

    output.push_str("| Metric | Value |\n|---|---|\n");
    for (metric, value) in metric_rows(analytics) {
        output.push_str(&format!("| {} | {} |\n", metric, value));
    }

    if !analytics.keywords.is_empty() {
        output.push_str("\n## Keywords\n\n");
        for keyword in &analytics.keywords {
            output.push_str(&format!("- **{}** ({:.1}%)\n", keyword.term, keyword.score * 100.0));
        }
    }

    output
}

fn metric_rows(analytics: &ContentAnalytics) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        (
            "Sentiment (compound)",
            analytics.sentiment.map_or_else(|| "n/a".to_string(), |s| format!("{:+.3}", s.compound)),
        ),
        ("Flesch reading ease", format!("{:.1}", analytics.flesch_reading_ease)),
        ("Flesch-Kincaid grade", format!("{:.1}", analytics.flesch_kincaid_grade)),
    ];

    if let Some(diversity) = analytics.lexical_diversity {
        rows.push(("Lexical diversity", format!("{:.3}", diversity)));
    }
    if let Some(avg) = analytics.average_sentence_length {
        rows.push(("Average sentence length", format!("{:.1}", avg)));
    }
    if let Some(cadence) = analytics.publishing_cadence_days {
        rows.push(("Publishing cadence (days)", format!("{:.1}", cadence)));
    }
    if let Some(words) = analytics.word_count() {
        rows.push(("Words", words.to_string()));
    }

    rows
}

fn escape_brackets(s: &str) -> String {
    s.replace('[', "\\[").replace(']', "\\]")
}

/// Markdown formatter with configurable options
pub struct MarkdownFormatter {
    config: MarkdownConfig,
}

impl MarkdownFormatter {
    pub fn new(config: MarkdownConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, analytics: &ContentAnalytics) -> String {
        convert_to_markdown(analytics, &self.config)
    }

    /// Reports for several posts. Frontmatter is only written for a single post.
    pub fn convert_all(&self, items: &[ContentAnalytics]) -> String {
        if let [single] = items {
            return self.convert(single);
        }
        let config = MarkdownConfig { include_frontmatter: false };
        items.iter().map(|a| convert_to_markdown(a, &config)).collect::<Vec<_>>().join("\n---\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::tests::sample_analytics;

    #[test]
    fn test_markdown_report() {
        let md = convert_to_markdown(&sample_analytics(), &MarkdownConfig::default());
        assert!(md.starts_with("# [Sample Post](https://example.substack.com/p/sample)"));
        assert!(md.contains("| Sentiment (compound) | +0.420 |"));
        assert!(md.contains("| Publishing cadence (days) | 3.5 |"));
        assert!(md.contains("## Keywords"));
        assert!(md.contains("- **rust** (25.0%)"));
        assert!(!md.contains("+++"));
    }

    #[test]
    fn test_markdown_frontmatter() {
        let config = MarkdownConfig { include_frontmatter: true };
        let md = convert_to_markdown(&sample_analytics(), &config);
        assert!(md.starts_with("+++\ntitle = \"Sample Post\"\n"));
        assert_eq!(md.matches("+++").count(), 2);
    }

    #[test]
    fn test_markdown_absent_sentiment() {
        let mut analytics = sample_analytics();
        analytics.sentiment = None;
        let md = convert_to_markdown(&analytics, &MarkdownConfig::default());
        assert!(md.contains("| Sentiment (compound) | n/a |"));
    }

    #[test]
    fn test_escape_brackets_in_title() {
        let mut analytics = sample_analytics();
        analytics.summary.title = "[Draft] Notes".to_string();
        let md = convert_to_markdown(&analytics, &MarkdownConfig::default());
        assert!(md.starts_with(r"# [\[Draft\] Notes]"));
    }

    #[test]
    fn test_convert_all_drops_frontmatter_for_batches() {
        let formatter = MarkdownFormatter::new(MarkdownConfig { include_frontmatter: true });
        assert!(formatter.convert_all(&[sample_analytics()]).starts_with("+++"));

        let md = formatter.convert_all(&[sample_analytics(), sample_analytics()]);
        assert!(!md.contains("+++"));
        assert_eq!(md.matches("# [Sample Post]").count(), 2);
    }
}
