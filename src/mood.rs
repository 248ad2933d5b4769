//! Mood (sentiment) classifier adapter.
//!
//! The contract is a single call: `score(text)` → five mood categories.
//! The bundled implementation is lexicon-driven and deterministic; a real
//! model backend implements the same trait. Mood scoring is never chunked —
//! the underlying model's context bound is assumed sufficient.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::AnalysisError;
use crate::morph::tokenize;
use crate::score::MoodScores;

#[derive(Debug, Deserialize)]
struct MoodLexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    speech: HashSet<String>,
}

static LEXICON: Lazy<MoodLexicon> = Lazy::new(|| {
    let raw = include_str!("../mood_lexicon.json");
    serde_json::from_str::<MoodLexicon>(raw).expect("valid mood lexicon")
});

/// Scoring contract of the mood oracle.
pub trait MoodScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<MoodScores, AnalysisError>;
}

/// Lexicon-backed mood classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoodAnalyzer;

impl MoodAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl MoodScorer for MoodAnalyzer {
    fn score(&self, text: &str) -> Result<MoodScores, AnalysisError> {
        let tokens: Vec<String> = tokenize(text).map(|t| t.to_lowercase()).collect();

        let mut positive_hits = 0i32;
        let mut negative_hits = 0i32;
        let mut speech_hits = 0i32;
        for t in &tokens {
            if LEXICON.positive.contains(t) {
                positive_hits += 1;
            }
            if LEXICON.negative.contains(t) {
                negative_hits += 1;
            }
            if LEXICON.speech.contains(t) {
                speech_hits += 1;
            }
        }

        let positive = saturating_score(positive_hits);
        let negative = saturating_score(negative_hits);
        let speech = saturating_score(speech_hits);
        // Neutral dominates when no category fires; skip grows on very short
        // or empty inputs the classifier has little to say about.
        let neutral = 1.0 - positive.max(negative).max(speech);
        let skip = 0.5f64.powi(tokens.len().min(8) as i32);

        Ok(MoodScores::new(positive, neutral, negative, skip, speech))
    }
}

/// Monotone map from lexicon hit count to [0,1): 0 → 0.0, 1 → 0.5, 2 → 0.75…
#[inline]
fn saturating_score(hits: i32) -> f64 {
    1.0 - 0.5f64.powi(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_text_scores_neutral() {
        let m = MoodAnalyzer::new().score("он шёл по дороге домой").unwrap();
        assert_eq!(m.positive, 0.0);
        assert_eq!(m.negative, 0.0);
        assert_eq!(m.neutral, 1.0);
    }

    #[test]
    fn positive_words_raise_positive() {
        let m = MoodAnalyzer::new()
            .score("отлично, я очень рад, всё прекрасно")
            .unwrap();
        assert!(m.positive > 0.8);
        assert!(m.positive > m.negative);
    }

    #[test]
    fn greeting_raises_speech() {
        let m = MoodAnalyzer::new().score("Привет, как дела?").unwrap();
        assert!(m.speech >= 0.5);
    }

    #[test]
    fn empty_text_is_mostly_skip() {
        let m = MoodAnalyzer::new().score("").unwrap();
        assert_eq!(m.skip, 1.0);
        assert_eq!(m.positive, 0.0);
    }

    #[test]
    fn all_fields_within_unit_interval() {
        let m = MoodAnalyzer::new()
            .score("ужасно плохо, ненавижу, но спасибо")
            .unwrap();
        for v in [m.positive, m.neutral, m.negative, m.skip, m.speech] {
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
