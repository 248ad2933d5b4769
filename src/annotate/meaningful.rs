//! "Meaningful text" heuristic.
//!
//! A text is judged meaningless when it contains fewer than 3 distinct
//! vocabulary-recognized words, or when recognized words exceed 70% of the
//! distinct word count — an upper-bound guard against degenerate short or
//! foreign inputs. Both thresholds are preserved as observed, not re-derived.

use std::collections::BTreeSet;

use crate::morph::ParsedDoc;

#[derive(Debug, Clone, Copy)]
pub struct MeaningfulVerdict {
    pub meaningful: bool,
    /// Total token count from parsing (not the distinct count).
    pub count_tokens: usize,
}

pub fn evaluate(doc: &ParsedDoc) -> MeaningfulVerdict {
    let mut distinct = BTreeSet::new();
    let mut known = BTreeSet::new();
    for token in &doc.tokens {
        let lower = token.text.to_lowercase();
        if token.known {
            known.insert(lower.clone());
        }
        distinct.insert(lower);
    }

    let known_count = known.len();
    let len_text = distinct.len();
    let meaningless = known_count < 3 || known_count as f64 > 0.7 * len_text as f64;

    MeaningfulVerdict {
        meaningful: !meaningless,
        count_tokens: doc.tokens.len(),
    }
}
