//! # Morphology
//! Tokenization, lemmatization and named-entity tagging over a shared,
//! immutable parsed document.
//!
//! The vocabulary is a bundled JSON dictionary (surface form → lemma) plus a
//! small gazetteer of named entities, loaded once per process. Real
//! morphological taggers plug in behind the same `parse` surface; the service
//! only depends on the document shape produced here.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct VocabData {
    /// Lowercased surface form → canonical lemma.
    lemmas: HashMap<String, String>,
    /// Entity type → (lemma-joined key → normalized form).
    gazetteer: HashMap<String, HashMap<String, String>>,
}

static VOCAB: Lazy<VocabData> = Lazy::new(|| {
    let raw = include_str!("../morph_vocab.json");
    serde_json::from_str::<VocabData>(raw).expect("valid morph vocabulary")
});

/// One word token of a parsed document.
#[derive(Debug, Clone)]
pub struct Token {
    /// Original surface form, case preserved.
    pub text: String,
    /// Canonical lemma; falls back to the lowercased surface form for words
    /// the vocabulary does not know.
    pub lemma: String,
    /// Whether the vocabulary recognizes the word.
    pub known: bool,
}

/// An entity span tagged in the document, already normalized.
#[derive(Debug, Clone)]
pub struct EntitySpan {
    pub kind: String,
    pub normal: String,
}

/// Segmented, lemmatized and NER-tagged view of one input text.
/// Built once per request and shared read-only across annotation stages.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    pub tokens: Vec<Token>,
    pub spans: Vec<EntitySpan>,
}

/// Handle to the process-wide morphological vocabulary. Cheap to copy;
/// all state lives in the bundled dictionary.
#[derive(Debug, Clone, Copy, Default)]
pub struct MorphVocab;

impl MorphVocab {
    pub fn new() -> Self {
        Self
    }

    /// Lemma for a single word plus whether the vocabulary knows it.
    pub fn lemma(&self, word: &str) -> (String, bool) {
        let lower = word.to_lowercase();
        match VOCAB.lemmas.get(&lower) {
            Some(l) => (l.clone(), true),
            None => (lower, false),
        }
    }

    pub fn word_is_known(&self, word: &str) -> bool {
        VOCAB.lemmas.contains_key(&word.to_lowercase())
    }

    /// Segment `text` into word tokens, lemmatize each one and tag entity
    /// spans against the gazetteer (longest match first, up to two tokens).
    pub fn parse(&self, text: &str) -> ParsedDoc {
        let tokens: Vec<Token> = tokenize(text)
            .map(|surface| {
                let (lemma, known) = self.lemma(surface);
                Token {
                    text: surface.to_string(),
                    lemma,
                    known,
                }
            })
            .collect();

        // Entity keys are matched over lemmas so inflected forms
        // ("Москву", "Москве") resolve to the same entry.
        let lemmas: Vec<&str> = tokens.iter().map(|t| t.lemma.as_str()).collect();
        let mut spans = Vec::new();
        let mut i = 0usize;
        while i < lemmas.len() {
            let mut matched = 0usize;
            for width in (1..=2usize).rev() {
                if i + width > lemmas.len() {
                    continue;
                }
                let key = lemmas[i..i + width].join(" ");
                if let Some((kind, normal)) = lookup_gazetteer(&key) {
                    spans.push(EntitySpan { kind, normal });
                    matched = width;
                    break;
                }
            }
            i += matched.max(1);
        }

        ParsedDoc { tokens, spans }
    }
}

fn lookup_gazetteer(key: &str) -> Option<(String, String)> {
    for (kind, entries) in &VOCAB.gazetteer {
        if let Some(normal) = entries.get(key) {
            return Some((kind.clone(), normal.clone()));
        }
    }
    None
}

/// Word tokenization: maximal runs of alphanumeric characters. Punctuation
/// and emoji act as separators and never appear in tokens.
pub fn tokenize(s: &str) -> impl Iterator<Item = &str> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}
