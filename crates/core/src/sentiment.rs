//! Sentiment scoring.
//!
//! Scoring is delegated to a lexicon/rule-based analyzer behind the
//! [`SentimentScorer`] trait. The default, [`VaderScorer`], wraps the
//! `vader_sentiment` crate. Its lexicon is loaded once per process and only
//! read afterwards, so a single scorer is shared by every [`crate::Analyzer`].

use std::sync::{Arc, LazyLock};

use vader_sentiment::SentimentIntensityAnalyzer;

use crate::models::SentimentBreakdown;

static VADER: LazyLock<SentimentIntensityAnalyzer> = LazyLock::new(SentimentIntensityAnalyzer::new);

/// Produces VADER-style polarity scores for a text.
///
/// Implementations must be pure with respect to shared state: the engine may
/// call the same scorer from many threads at once.
pub trait SentimentScorer: Send + Sync {
    /// Scores `text`. Callers guarantee `text` is not blank.
    fn polarity_scores(&self, text: &str) -> SentimentBreakdown;
}

/// [`SentimentScorer`] backed by the VADER lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaderScorer;

impl VaderScorer {
    /// Returns the scorer, loading the lexicon on first use.
    pub fn new() -> Self {
        LazyLock::force(&VADER);
        Self
    }

    /// The process-wide scorer as a shareable trait object.
    pub fn shared() -> Arc<dyn SentimentScorer> {
        Arc::new(Self::new())
    }
}

impl SentimentScorer for VaderScorer {
    fn polarity_scores(&self, text: &str) -> SentimentBreakdown {
        let scores = VADER.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);
        let (negative, positive) = (get("neg"), get("pos"));

        // without a sentiment-bearing token, punctuation emphasis has nothing to amplify
        let compound = if negative == 0.0 && positive == 0.0 { 0.0 } else { get("compound").clamp(-1.0, 1.0) };

        SentimentBreakdown { negative, neutral: get("neu"), positive, compound }
    }
}

/// Scores `text` only when it contains something other than whitespace.
///
/// Blank text yields `None`: sentiment was not computed, which is distinct
/// from a neutral score.
pub fn score_sentiment(scorer: &dyn SentimentScorer, text: &str) -> Option<SentimentBreakdown> {
    if text.trim().is_empty() {
        return None;
    }
    Some(scorer.polarity_scores(text))
}
