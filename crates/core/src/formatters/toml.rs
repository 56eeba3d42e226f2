use time::format_description::well_known::Rfc3339;

use crate::models::ContentAnalytics;

/// Convert an analytics record's headline figures to TOML key/value lines.
///
/// Manual TOML serialization to avoid adding the toml crate dependency.
/// Absent values produce no line.
pub fn analytics_to_toml(analytics: &ContentAnalytics) -> String {
    let summary = &analytics.summary;
    let mut toml = String::new();

    toml.push_str(&format!("title = {}\n", toml_escape_string(&summary.title)));
    toml.push_str(&format!("url = {}\n", toml_escape_string(summary.url.as_str())));

    if let Some(author) = &summary.author {
        toml.push_str(&format!("author = {}\n", toml_escape_string(author)));
    }

    if let Some(published) = summary.published_at.and_then(|at| at.format(&Rfc3339).ok()) {
        toml.push_str(&format!("published_at = {}\n", published));
    }

    if !summary.tags.is_empty() {
        let tags: Vec<String> = summary.tags.iter().map(|t| toml_escape_string(t)).collect();
        toml.push_str(&format!("tags = [{}]\n", tags.join(", ")));
    }

    if let Some(word_count) = analytics.word_count() {
        toml.push_str(&format!("word_count = {}\n", word_count));
    }

    toml.push_str(&format!("flesch_reading_ease = {:.2}\n", analytics.flesch_reading_ease));
    toml.push_str(&format!("flesch_kincaid_grade = {:.2}\n", analytics.flesch_kincaid_grade));

    if let Some(sentiment) = &analytics.sentiment {
        toml.push_str(&format!("sentiment_compound = {:.4}\n", sentiment.compound));
    }

    if let Some(cadence) = analytics.publishing_cadence_days {
        toml.push_str(&format!("publishing_cadence_days = {:.2}\n", cadence));
    }

    toml
}

/// Escape a string for TOML format
pub(crate) fn toml_escape_string(s: &str) -> String {
    let needs_escape = s.contains('"') || s.contains('\\') || s.contains('\n');
    if needs_escape {
        format!(
            "\"{}\"",
            s.replace('\\', "\\\\").replace('\"', "\\\"").replace('\n', "\\n")
        )
    } else {
        format!("\"{}\"", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::tests::sample_analytics;

    #[test]
    fn test_analytics_to_toml_basic() {
        let toml = analytics_to_toml(&sample_analytics());
        assert!(toml.contains("title = \"Sample Post\""));
        assert!(toml.contains("url = \"https://example.substack.com/p/sample\""));
        assert!(toml.contains("author = \"Jane Writer\""));
        assert!(toml.contains("published_at = 2024-03-01T12:00:00Z"));
        assert!(toml.contains("tags = [\"rust\", \"writing\"]"));
        assert!(toml.contains("word_count = 10"));
        assert!(toml.contains("flesch_reading_ease = 61.33"));
        assert!(toml.contains("sentiment_compound = 0.4200"));
        assert!(toml.contains("publishing_cadence_days = 3.50"));
    }

    #[test]
    fn test_analytics_to_toml_omits_absent_values() {
        let mut analytics = sample_analytics();
        analytics.sentiment = None;
        analytics.publishing_cadence_days = None;
        analytics.summary.author = None;
        analytics.summary.published_at = None;

        let toml = analytics_to_toml(&analytics);
        assert!(!toml.contains("sentiment_compound"));
        assert!(!toml.contains("publishing_cadence_days"));
        assert!(!toml.contains("author"));
        assert!(!toml.contains("published_at"));
    }

    #[test]
    fn test_toml_escape_with_quotes() {
        let escaped = toml_escape_string("My \"Title\" here");
        assert_eq!(escaped, r#""My \"Title\" here""#);
    }

    #[test]
    fn test_toml_escape_with_newlines() {
        let escaped = toml_escape_string("Line 1\nLine 2");
        assert_eq!(escaped, r#""Line 1\nLine 2""#);
    }

    #[test]
    fn test_toml_escape_with_backslashes() {
        let escaped = toml_escape_string(r#"Path\to\file"#);
        assert_eq!(escaped, r#""Path\\to\\file""#);
    }
}
