//! Readability metrics: syllable counting, Flesch Reading Ease and
//! Flesch-Kincaid Grade Level.
//!
//! Both formulas return `0.0` when the word or sentence count is zero. That
//! value is a degenerate-input sentinel, not a meaningful score.
//!
//! # Example
//!
//! ```rust
//! use stackscope_core::readability::{count_syllables, flesch_reading_ease};
//!
//! assert_eq!(count_syllables("analytics"), 4);
//! assert_eq!(flesch_reading_ease(0, 0, 0), 0.0);
//! ```

use serde::Serialize;

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Estimates the syllables in a word by counting vowel groups.
///
/// A trailing `e` is treated as silent when the word already has more than
/// one group. Every word counts for at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut syllables = 0usize;
    let mut previous_was_vowel = false;

    for c in word.chars() {
        let is_vowel = VOWELS.contains(&c);
        if is_vowel && !previous_was_vowel {
            syllables += 1;
        }
        previous_was_vowel = is_vowel;
    }

    if word.ends_with('e') && syllables > 1 {
        syllables -= 1;
    }

    syllables.max(1)
}

fn ratios(word_count: usize, sentence_count: usize, syllable_count: usize) -> Option<(f64, f64)> {
    if word_count == 0 || sentence_count == 0 {
        return None;
    }
    let words_per_sentence = word_count as f64 / sentence_count as f64;
    let syllables_per_word = syllable_count as f64 / word_count as f64;
    Some((words_per_sentence, syllables_per_word))
}

/// Flesch Reading Ease: `206.835 - 1.015 * (w/s) - 84.6 * (syl/w)`.
pub fn flesch_reading_ease(word_count: usize, sentence_count: usize, syllable_count: usize) -> f64 {
    match ratios(word_count, sentence_count, syllable_count) {
        Some((wps, spw)) => 206.835 - (1.015 * wps) - (84.6 * spw),
        None => 0.0,
    }
}

/// Flesch-Kincaid Grade Level: `0.39 * (w/s) + 11.8 * (syl/w) - 15.59`.
pub fn flesch_kincaid_grade(word_count: usize, sentence_count: usize, syllable_count: usize) -> f64 {
    match ratios(word_count, sentence_count, syllable_count) {
        Some((wps, spw)) => (0.39 * wps) + (11.8 * spw) - 15.59,
        None => 0.0,
    }
}

/// Both readability scores computed from one set of counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReadabilityScores {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
}

impl ReadabilityScores {
    pub fn from_counts(word_count: usize, sentence_count: usize, syllable_count: usize) -> Self {
        Self {
            flesch_reading_ease: flesch_reading_ease(word_count, sentence_count, syllable_count),
            flesch_kincaid_grade: flesch_kincaid_grade(word_count, sentence_count, syllable_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("the", 1)]
    #[case("cat", 1)]
    #[case("hello", 2)]
    #[case("simple", 1)]
    #[case("make", 1)]
    #[case("analytics", 4)]
    #[case("beautiful", 3)]
    #[case("queue", 1)]
    #[case("rhythm", 1)]
    #[case("bcd", 1)]
    #[case("don't", 1)]
    #[case("ANALYTICS", 4)]
    #[case("", 1)]
    fn test_count_syllables(#[case] word: &str, #[case] expected: usize) {
        assert_eq!(count_syllables(word), expected);
    }

    #[test]
    fn test_zero_guards() {
        assert_eq!(flesch_reading_ease(0, 0, 0), 0.0);
        assert_eq!(flesch_kincaid_grade(0, 0, 0), 0.0);
        assert_eq!(flesch_reading_ease(5, 0, 7), 0.0);
        assert_eq!(flesch_kincaid_grade(0, 3, 0), 0.0);
    }

    #[test]
    fn test_flesch_reading_ease_simple_sentence() {
        // "The cat sat." -> 3 words, 1 sentence, 3 syllables
        let score = flesch_reading_ease(3, 1, 3);
        assert!((score - 119.19).abs() < 1e-9);
    }

    #[test]
    fn test_flesch_kincaid_grade_simple_sentence() {
        let grade = flesch_kincaid_grade(3, 1, 3);
        assert!((grade - (-2.62)).abs() < 1e-9);
    }

    #[test]
    fn test_harder_text_scores_lower() {
        let easy = flesch_reading_ease(10, 2, 12);
        let hard = flesch_reading_ease(30, 1, 60);
        assert!(hard < easy);
        assert!(flesch_kincaid_grade(30, 1, 60) > flesch_kincaid_grade(10, 2, 12));
    }

    #[test]
    fn test_scores_from_counts() {
        let scores = ReadabilityScores::from_counts(3, 1, 3);
        assert_eq!(scores.flesch_reading_ease, flesch_reading_ease(3, 1, 3));
        assert_eq!(scores.flesch_kincaid_grade, flesch_kincaid_grade(3, 1, 3));
        assert_eq!(ReadabilityScores::from_counts(0, 1, 0).flesch_reading_ease, 0.0);
    }
}
