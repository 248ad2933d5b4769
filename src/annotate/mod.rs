//! # Annotation Pipeline
//! Parses a text once into a shared document, then runs artifact extraction,
//! the lemma filter and the meaningful-text heuristic concurrently over it
//! and merges their outputs into one [`Annotation`].
//!
//! The stages are read-only over the shared parse and write disjoint fields,
//! so the fan-out is a structured task group (`tokio::try_join!` over
//! blocking tasks) that fails fast if any stage panics; no partial
//! annotation is ever produced.

pub mod artifacts;
pub mod filter;
pub mod meaningful;

use std::sync::Arc;

use serde::Serialize;
use tokio::task;

pub use crate::annotate::artifacts::ArtifactMap;
pub use crate::annotate::filter::WordFilterResult;
pub use crate::annotate::meaningful::MeaningfulVerdict;

use crate::error::AnalysisError;
use crate::morph::MorphVocab;

/// Combined annotation output for one text.
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub artifacts: ArtifactMap,
    pub filters: WordFilterResult,
    pub meaningful: bool,
    pub meaningful_count_tokens: usize,
}

/// Annotate a single text. Defined only for single texts; the orchestrator
/// rejects batch inputs before reaching this point.
pub async fn annotate(
    vocab: MorphVocab,
    text: &str,
    filters: &[String],
) -> Result<Annotation, AnalysisError> {
    // One parse shared by every stage.
    let doc = {
        let text = text.to_owned();
        task::spawn_blocking(move || vocab.parse(&text)).await?
    };
    let doc = Arc::new(doc);

    let entities = {
        let doc = Arc::clone(&doc);
        task::spawn_blocking(move || artifacts::extract_entities(&doc))
    };
    let dates = {
        let text = text.to_owned();
        task::spawn_blocking(move || artifacts::extract_dates(&text))
    };
    let addresses = {
        let text = text.to_owned();
        task::spawn_blocking(move || artifacts::extract_addresses(&text))
    };
    let patterns = {
        let text = text.to_owned();
        task::spawn_blocking(move || {
            (
                artifacts::extract_phones(&text),
                artifacts::extract_emails(&text),
                artifacts::extract_links(&text),
            )
        })
    };
    let word_filter = {
        let doc = Arc::clone(&doc);
        let filters = filters.to_vec();
        task::spawn_blocking(move || {
            let forbidden = filter::forbidden_lemmas(&vocab, &filters);
            filter::apply(&doc, &forbidden)
        })
    };
    let verdict = {
        let doc = Arc::clone(&doc);
        task::spawn_blocking(move || meaningful::evaluate(&doc))
    };

    let (entities, dates, addresses, (phones, emails, links), word_filter, verdict) =
        tokio::try_join!(entities, dates, addresses, patterns, word_filter, verdict)?;

    Ok(Annotation {
        artifacts: artifacts::merge(entities, dates, addresses, phones, emails, links),
        filters: word_filter,
        meaningful: verdict.meaningful,
        meaningful_count_tokens: verdict.count_tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn annotation_merges_all_stage_outputs() {
        let text = "он бежал по дороге, звоните +7 999 123 45 67";
        let filters = vec!["бежать".to_string()];
        let ann = annotate(MorphVocab::new(), text, &filters).await.unwrap();

        assert!(!ann.filters.passed);
        assert!(ann.filters.tokens.contains("бежал"));
        assert!(ann.artifacts.contains_key(artifacts::PHONES_KEY));
        assert!(ann.meaningful_count_tokens > 0);
    }

    #[tokio::test]
    async fn no_phone_means_no_phones_bucket() {
        let ann = annotate(MorphVocab::new(), "он шёл по дороге домой", &[])
            .await
            .unwrap();
        assert!(!ann.artifacts.contains_key(artifacts::PHONES_KEY));
        assert!(ann.filters.passed);
    }
}
