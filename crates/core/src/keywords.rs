//! Frequency-based keyword extraction.

use std::collections::HashMap;

use crate::models::KeywordScore;

/// Common English function words excluded from keywords.
pub const STOPWORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "he", "in", "is",
    "it", "its", "of", "on", "or", "she", "that", "the", "their", "there", "to", "was", "were", "will", "with", "you",
    "your",
];

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Returns the `top_n` most frequent qualifying tokens.
///
/// A token qualifies when it is not a stopword and has at least
/// `min_length` characters. Ties keep first-seen order. Each score is the
/// term's count divided by the count of *all* qualifying tokens, so scores
/// sum to 1 only when every distinct term is returned.
pub fn extract_keywords<S: AsRef<str>>(tokens: &[S], top_n: usize, min_length: usize) -> Vec<KeywordScore> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;

    for token in tokens {
        let token: &str = token.as_ref();
        if token.chars().count() < min_length || is_stopword(token) {
            continue;
        }
        total += 1;
        match index.get(token) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    if total == 0 {
        return Vec::new();
    }

    // stable: equal counts stay in encounter order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    tracing::trace!(distinct = counts.len(), total, "keyword frequencies counted");

    counts
        .into_iter()
        .take(top_n)
        .map(|(term, count)| KeywordScore { term: term.to_string(), score: count as f64 / total as f64 })
        .collect()
}
