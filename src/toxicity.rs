//! Toxicity classifier adapter and the chunked scoring path.
//!
//! The oracle contract is `encode` (text → tokens in the model's own units)
//! and `score_chunk` (text → raw 5-wide probability array + consumed token
//! count, ordered [non_toxic, insult, obscenity, threat, dangerous]).
//!
//! Texts whose encoded length exceeds the configured budget are split by the
//! chunker, scored chunk by chunk and folded with the field-specific merge
//! rules in [`crate::score`].

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::chunker;
use crate::error::AnalysisError;
use crate::morph::tokenize;
use crate::score::{merge_toxicity_chunks, ToxicityScores};

#[derive(Debug, Deserialize)]
struct ToxicityLexicon {
    insult: HashSet<String>,
    obscenity: HashSet<String>,
    threat: HashSet<String>,
    dangerous: HashSet<String>,
}

static LEXICON: Lazy<ToxicityLexicon> = Lazy::new(|| {
    let raw = include_str!("../toxicity_lexicon.json");
    serde_json::from_str::<ToxicityLexicon>(raw).expect("valid toxicity lexicon")
});

/// Scoring contract of the toxicity oracle.
pub trait ToxicityScorer: Send + Sync {
    /// Encode a text into the model's atomic units.
    fn encode(&self, text: &str) -> Vec<String>;

    /// Score one chunk: raw probability array plus the token count consumed.
    fn score_chunk(&self, text: &str) -> Result<([f64; 5], usize), AnalysisError>;
}

/// Lexicon-backed toxicity classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToxicityAnalyzer;

impl ToxicityAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl ToxicityScorer for ToxicityAnalyzer {
    fn encode(&self, text: &str) -> Vec<String> {
        tokenize(text).map(|t| t.to_lowercase()).collect()
    }

    fn score_chunk(&self, text: &str) -> Result<([f64; 5], usize), AnalysisError> {
        let tokens = self.encode(text);

        let mut insult_hits = 0i32;
        let mut obscenity_hits = 0i32;
        let mut threat_hits = 0i32;
        let mut dangerous_hits = 0i32;
        for t in &tokens {
            if LEXICON.insult.contains(t) {
                insult_hits += 1;
            }
            if LEXICON.obscenity.contains(t) {
                obscenity_hits += 1;
            }
            if LEXICON.threat.contains(t) {
                threat_hits += 1;
            }
            if LEXICON.dangerous.contains(t) {
                dangerous_hits += 1;
            }
        }

        let insult = saturating_score(insult_hits);
        let obscenity = saturating_score(obscenity_hits);
        let threat = saturating_score(threat_hits);
        let dangerous = saturating_score(dangerous_hits);
        let non_toxic = 1.0 - insult.max(obscenity).max(threat).max(dangerous);

        Ok((
            [non_toxic, insult, obscenity, threat, dangerous],
            tokens.len(),
        ))
    }
}

#[inline]
fn saturating_score(hits: i32) -> f64 {
    1.0 - 0.5f64.powi(hits)
}

/// Score a full text through the chunking path.
///
/// Within budget the raw chunk vector is returned as-is (including the
/// model's own `non_toxic`). Over budget the text is split into balanced
/// chunks, each chunk scored independently, and the per-chunk vectors folded
/// left to right with the chunk-merge rules; the total token count is the
/// sum over chunks.
pub fn score_with_chunking<S: ToxicityScorer>(
    scorer: &S,
    text: &str,
    max_tokens: usize,
) -> Result<(ToxicityScores, usize), AnalysisError> {
    let tokens = scorer.encode(text);
    let chunks = chunker::split(text, &tokens, max_tokens)?;

    if chunks.len() == 1 {
        let (raw, used) = scorer.score_chunk(&chunks[0])?;
        return Ok((ToxicityScores::from_raw(raw), used));
    }

    let mut scored = Vec::with_capacity(chunks.len());
    let mut total_tokens = 0usize;
    for chunk in &chunks {
        let (raw, used) = scorer.score_chunk(chunk)?;
        total_tokens += used;
        scored.push(ToxicityScores::from_raw(raw));
    }

    let merged = merge_toxicity_chunks(&scored).ok_or_else(|| {
        AnalysisError::ChunkBoundary("chunker produced no chunks for non-empty text".into())
    })?;
    Ok((merged, total_tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_is_non_toxic() {
        let (scores, tokens) =
            score_with_chunking(&ToxicityAnalyzer::new(), "он шёл по дороге домой", 512).unwrap();
        assert_eq!(scores.non_toxic, 1.0);
        assert_eq!(scores.insult, 0.0);
        assert_eq!(tokens, 5);
    }

    #[test]
    fn insults_raise_insult_and_lower_non_toxic() {
        let (scores, _) =
            score_with_chunking(&ToxicityAnalyzer::new(), "ты дурак и идиот", 512).unwrap();
        assert!(scores.insult >= 0.75);
        assert_eq!(scores.non_toxic, crate::score::round3(1.0 - scores.insult));
    }

    #[test]
    fn chunked_text_reports_summed_token_count() {
        let body = "слово ".repeat(1000);
        let (_, tokens) = score_with_chunking(&ToxicityAnalyzer::new(), &body, 512).unwrap();
        assert_eq!(tokens, 1000);
    }

    #[test]
    fn chunked_merge_rewrites_non_toxic_from_final_insult() {
        // Insult words in the tail chunk only; the merged result must still
        // carry the running max and its complement.
        let mut body = "слово ".repeat(600);
        body.push_str("дурак идиот кретин");
        let (scores, _) = score_with_chunking(&ToxicityAnalyzer::new(), &body, 512).unwrap();
        assert!(scores.insult > 0.0);
        assert_eq!(scores.non_toxic, crate::score::round3(1.0 - scores.insult));
    }
}
