//! Word tokenisation and sentence segmentation.
//!
//! A token is a maximal run of ASCII letters or apostrophes, lower-cased.
//! A sentence is a maximal run of characters containing none of `.`, `!`
//! or `?`; whitespace-only runs are discarded.

use std::sync::LazyLock;

use regex::Regex;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z']+").expect("valid token regex"));
static SENTENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.!?]+").expect("valid sentence regex"));

/// Splits text into lower-cased word tokens, in order of appearance.
pub fn tokenise(text: &str) -> Vec<String> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str().to_ascii_lowercase()).collect()
}

/// Token count of every non-empty sentence segment, in order.
///
/// The length of the returned vector is the literal sentence count.
pub fn sentence_lengths(text: &str) -> Vec<usize> {
    SENTENCE_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| TOKEN_RE.find_iter(segment).count())
        .collect()
}
