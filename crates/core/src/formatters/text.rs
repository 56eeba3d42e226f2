use time::format_description::well_known::Rfc3339;

use crate::models::ContentAnalytics;

/// Configuration for plain text reports
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Include title, URL and date header
    pub include_header: bool,

    /// Maximum keywords listed (0 = all)
    pub keyword_limit: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { include_header: true, keyword_limit: 0 }
    }
}

/// Plain text formatter for analytics reports
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, analytics: &ContentAnalytics) -> String {
        convert_to_text(analytics, &self.config)
    }

    /// Reports for several posts, separated by a rule.
    pub fn convert_all(&self, items: &[ContentAnalytics]) -> String {
        items.iter().map(|a| self.convert(a)).collect::<Vec<_>>().join(&format!("\n\n{}\n\n", "-".repeat(40)))
    }
}

/// Render an analytics record as a plain text report
pub fn convert_to_text(analytics: &ContentAnalytics, config: &TextConfig) -> String {
    let mut output = String::new();

    if config.include_header {
        output.push_str(&generate_header(analytics));
        output.push('\n');
    }

    let mut lines = Vec::new();

    match &analytics.sentiment {
        Some(s) => lines.push(format!(
            "Sentiment: {:+.3} (positive {:.3}, neutral {:.3}, negative {:.3})",
            s.compound, s.positive, s.neutral, s.negative
        )),
        None => lines.push("Sentiment: not computed".to_string()),
    }

    lines.push(format!(
        "Readability: reading ease {:.1}, grade level {:.1}",
        analytics.flesch_reading_ease, analytics.flesch_kincaid_grade
    ));

    if let Some(diversity) = analytics.lexical_diversity {
        lines.push(format!("Lexical diversity: {:.3}", diversity));
    }

    if let Some(avg) = analytics.average_sentence_length {
        lines.push(format!("Average sentence length: {:.1} words", avg));
    }

    if let Some(cadence) = analytics.publishing_cadence_days {
        lines.push(format!("Publishing cadence: every {:.1} days", cadence));
    }

    lines.push(format!(
        "Counts: {} words, {} sentences, {} syllables",
        count_or_dash(analytics.word_count()),
        count_or_dash(analytics.sentence_count()),
        count_or_dash(analytics.syllable_count())
    ));

    output.push_str(&lines.join("\n"));

    if !analytics.keywords.is_empty() {
        let limit = if config.keyword_limit == 0 { analytics.keywords.len() } else { config.keyword_limit };
        output.push_str("\n\nKeywords:\n");
        let listed: Vec<String> = analytics
            .keywords
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, k)| format!("{:>3}. {} ({:.1}%)", i + 1, k.term, k.score * 100.0))
            .collect();
        output.push_str(&listed.join("\n"));
    }

    output
}

fn count_or_dash(count: Option<u64>) -> String {
    count.map_or_else(|| "-".to_string(), |c| c.to_string())
}

/// Generate a header from the post summary
fn generate_header(analytics: &ContentAnalytics) -> String {
    let summary = &analytics.summary;
    let mut header = String::new();

    header.push_str(&summary.title);
    header.push('\n');
    header.push_str(&"=".repeat(summary.title.chars().count()));
    header.push('\n');

    let mut meta_parts = vec![summary.url.to_string()];

    if let Some(author) = &summary.author {
        meta_parts.push(format!("By: {}", author));
    }

    if let Some(date) = summary.published_at.and_then(|at| at.format(&Rfc3339).ok()) {
        meta_parts.push(format!("Date: {}", date));
    }

    header.push_str(&meta_parts.join(" | "));
    header.push('\n');

    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::tests::sample_analytics;

    #[test]
    fn test_text_report_with_header() {
        let text = convert_to_text(&sample_analytics(), &TextConfig::default());
        assert!(text.starts_with("Sample Post\n===========\n"));
        assert!(text.contains("https://example.substack.com/p/sample | By: Jane Writer | Date: 2024-03-01T12:00:00Z"));
        assert!(text.contains("Sentiment: +0.420 (positive 0.300, neutral 0.600, negative 0.100)"));
        assert!(text.contains("Readability: reading ease 61.3, grade level 8.4"));
        assert!(text.contains("Publishing cadence: every 3.5 days"));
        assert!(text.contains("Counts: 10 words, 2 sentences, 15 syllables"));
        assert!(text.contains("  1. rust (25.0%)"));
    }

    #[test]
    fn test_text_report_without_header() {
        let config = TextConfig { include_header: false, ..Default::default() };
        let text = convert_to_text(&sample_analytics(), &config);
        assert!(text.starts_with("Sentiment:"));
    }

    #[test]
    fn test_text_report_absent_values() {
        let mut analytics = sample_analytics();
        analytics.sentiment = None;
        analytics.lexical_diversity = None;
        analytics.publishing_cadence_days = None;
        analytics.keywords.clear();

        let text = convert_to_text(&analytics, &TextConfig::default());
        assert!(text.contains("Sentiment: not computed"));
        assert!(!text.contains("Lexical diversity"));
        assert!(!text.contains("Publishing cadence"));
        assert!(!text.contains("Keywords"));
    }

    #[test]
    fn test_keyword_limit() {
        let config = TextConfig { keyword_limit: 1, ..Default::default() };
        let text = convert_to_text(&sample_analytics(), &config);
        assert!(text.contains("1. rust"));
        assert!(!text.contains("writing ("));
    }

    #[test]
    fn test_convert_all_separates_reports() {
        let formatter = TextFormatter::new(TextConfig::default());
        let text = formatter.convert_all(&[sample_analytics(), sample_analytics()]);
        assert_eq!(text.matches("Sample Post\n=").count(), 2);
        assert!(text.contains(&"-".repeat(40)));
    }
}
