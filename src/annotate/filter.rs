//! Lemma-based forbidden-word filter.
//!
//! Each caller-supplied filter word is parsed independently and reduced to
//! the lemma of its first token (a multi-word filter phrase collapses to its
//! first word's lemma — a kept simplification of the contract). The input
//! text passes when none of its token lemmas match a forbidden lemma.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::morph::{MorphVocab, ParsedDoc};

/// Result of applying the filter to one text.
#[derive(Debug, Clone, Serialize)]
pub struct WordFilterResult {
    pub passed: bool,
    /// Surface forms (original spelling) of the tokens that matched.
    pub tokens: BTreeSet<String>,
}

/// Derive the forbidden-lemma set from raw filter words. Filter entries that
/// produce no tokens (empty strings, pure punctuation) are skipped, so an
/// empty filter list degenerates to "no filter applied".
pub fn forbidden_lemmas(vocab: &MorphVocab, filters: &[String]) -> BTreeSet<String> {
    filters
        .iter()
        .filter_map(|word| {
            let doc = vocab.parse(word);
            doc.tokens.first().map(|t| t.lemma.clone())
        })
        .collect()
}

/// Collect surface forms of tokens whose lemma is forbidden.
pub fn apply(doc: &ParsedDoc, forbidden: &BTreeSet<String>) -> WordFilterResult {
    let mut matched = BTreeSet::new();
    if !forbidden.is_empty() {
        for token in &doc.tokens {
            if forbidden.contains(&token.lemma) {
                matched.insert(token.text.clone());
            }
        }
    }
    WordFilterResult {
        passed: matched.is_empty(),
        tokens: matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn inflected_form_matches_filter_lemma() {
        let vocab = MorphVocab::new();
        let forbidden = forbidden_lemmas(&vocab, &strings(&["бежать"]));
        let doc = vocab.parse("он бежал по дороге");
        let res = apply(&doc, &forbidden);
        assert!(!res.passed);
        assert_eq!(res.tokens, BTreeSet::from(["бежал".to_string()]));
    }

    #[test]
    fn clean_text_passes() {
        let vocab = MorphVocab::new();
        let forbidden = forbidden_lemmas(&vocab, &strings(&["бежать"]));
        let doc = vocab.parse("он шёл по дороге");
        let res = apply(&doc, &forbidden);
        assert!(res.passed);
        assert!(res.tokens.is_empty());
    }

    #[test]
    fn empty_filter_list_always_passes() {
        let vocab = MorphVocab::new();
        let forbidden = forbidden_lemmas(&vocab, &[]);
        assert!(forbidden.is_empty());
        let doc = vocab.parse("любой текст вообще");
        assert!(apply(&doc, &forbidden).passed);
    }

    #[test]
    fn multi_word_filter_reduces_to_first_lemma() {
        let vocab = MorphVocab::new();
        let forbidden = forbidden_lemmas(&vocab, &strings(&["бежать быстро"]));
        assert_eq!(forbidden, BTreeSet::from(["бежать".to_string()]));
    }

    #[test]
    fn repeated_matches_collapse_to_one_surface_form() {
        let vocab = MorphVocab::new();
        let forbidden = forbidden_lemmas(&vocab, &strings(&["бежать"]));
        let doc = vocab.parse("бежал, бежал и снова бежал");
        let res = apply(&doc, &forbidden);
        assert_eq!(res.tokens.len(), 1);
    }
}
