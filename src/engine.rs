//! # Request Orchestrator
//! Fans one text (or a list of texts) out to the mood scorer, the chunked
//! toxicity path and the annotation pipeline, then assembles the unified
//! result records. Batch results feed the score aggregator for summary mode.
//!
//! All analyses of a request either complete or the request fails as a
//! whole; no partial record is ever returned.

use std::time::{Duration, Instant};

use tokio::task::{self, JoinSet};
use tracing::debug;

use crate::annotate::{self, Annotation};
use crate::config::ServiceConfig;
use crate::error::AnalysisError;
use crate::mood::{MoodAnalyzer, MoodScorer};
use crate::morph::MorphVocab;
use crate::record::{AnalysisRecord, BatchRecord, BatchSummary, CollectionResponse};
use crate::score::{average, MoodScores, ToxicityScores};
use crate::toxicity::{score_with_chunking, ToxicityAnalyzer};

/// Request input, resolved once at the API boundary. Single and batch inputs
/// route to distinct code paths; annotation is defined for `Single` only.
#[derive(Debug, Clone)]
pub enum AnalyzeInput {
    Single { text: String, filters: Vec<String> },
    Batch { texts: Vec<String> },
}

/// Process-wide analysis engine. The classifier and vocabulary handles are
/// built once at startup and shared read-only across all requests.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    mood: MoodAnalyzer,
    toxicity: ToxicityAnalyzer,
    vocab: MorphVocab,
    config: ServiceConfig,
}

impl AnalysisEngine {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            mood: MoodAnalyzer::new(),
            toxicity: ToxicityAnalyzer::new(),
            vocab: MorphVocab::new(),
            config,
        }
    }

    /// Single-text path: mood, toxicity and annotation run concurrently;
    /// the record carries the request latency.
    pub async fn analyze_text(
        &self,
        text: &str,
        filters: &[String],
    ) -> Result<AnalysisRecord, AnalysisError> {
        let started = Instant::now();

        let mood_task = {
            let mood = self.mood;
            let text = text.to_owned();
            task::spawn_blocking(move || mood.score(&text))
        };
        let toxicity_task = {
            let scorer = self.toxicity;
            let text = text.to_owned();
            let max_tokens = self.config.max_chunk_tokens;
            task::spawn_blocking(move || score_with_chunking(&scorer, &text, max_tokens))
        };

        let (mood, (toxicity, toxicity_count_tokens), annotation): (
            MoodScores,
            (ToxicityScores, usize),
            Annotation,
        ) = tokio::try_join!(
            async { Ok::<_, AnalysisError>(mood_task.await??) },
            async { Ok::<_, AnalysisError>(toxicity_task.await??) },
            annotate::annotate(self.vocab, text, filters),
        )?;

        let elapsed = started.elapsed();
        debug!(tokens = toxicity_count_tokens, ?elapsed, "analyzed text");

        Ok(AnalysisRecord {
            mood,
            toxicity,
            toxicity_count_tokens,
            artifacts: annotation.artifacts,
            filters: annotation.filters,
            meaningful: annotation.meaningful,
            meaningful_count_tokens: annotation.meaningful_count_tokens,
            execution: Some(format_execution(elapsed)),
        })
    }

    /// Batch path: mood + toxicity per item (annotation is not part of the
    /// batch contract), fanned out with at most `workers` items in flight.
    /// Any failing item fails the whole batch. Output order follows input
    /// order regardless of completion order.
    pub async fn analyze_batch(&self, texts: &[String]) -> Result<Vec<BatchRecord>, AnalysisError> {
        let workers = self.config.workers.max(1);
        let mut set: JoinSet<Result<(usize, BatchRecord), AnalysisError>> = JoinSet::new();
        let mut indexed: Vec<(usize, BatchRecord)> = Vec::with_capacity(texts.len());
        let mut next = 0usize;

        while next < texts.len() || !set.is_empty() {
            while next < texts.len() && set.len() < workers {
                let mood = self.mood;
                let scorer = self.toxicity;
                let max_tokens = self.config.max_chunk_tokens;
                let text = texts[next].clone();
                let index = next;
                set.spawn(async move {
                    let mood_task = {
                        let text = text.clone();
                        task::spawn_blocking(move || mood.score(&text))
                    };
                    let toxicity_task = task::spawn_blocking(move || {
                        score_with_chunking(&scorer, &text, max_tokens)
                    });
                    let (mood, (toxicity, toxicity_count_tokens)) = tokio::try_join!(
                        async { Ok::<_, AnalysisError>(mood_task.await??) },
                        async { Ok::<_, AnalysisError>(toxicity_task.await??) },
                    )?;
                    Ok((
                        index,
                        BatchRecord {
                            mood,
                            toxicity,
                            toxicity_count_tokens,
                        },
                    ))
                });
                next += 1;
            }
            if let Some(joined) = set.join_next().await {
                // An Err here drops the set and aborts outstanding items.
                indexed.push(joined??);
            }
        }

        indexed.sort_by_key(|(i, _)| *i);
        Ok(indexed.into_iter().map(|(_, r)| r).collect())
    }

    /// Collection endpoint payload: batch results plus request latency.
    pub async fn analyze_collection(
        &self,
        texts: &[String],
    ) -> Result<CollectionResponse, AnalysisError> {
        let started = Instant::now();
        let results = self.analyze_batch(texts).await?;
        Ok(CollectionResponse {
            results,
            execution: Some(format_execution(started.elapsed())),
        })
    }

    /// Summary mode: run the batch path, then reduce the mood and toxicity
    /// lists independently with the arithmetic batch merge.
    pub async fn summarize(&self, texts: &[String]) -> Result<BatchSummary, AnalysisError> {
        let started = Instant::now();
        let records = self.analyze_batch(texts).await?;

        let moods: Vec<MoodScores> = records.iter().map(|r| r.mood).collect();
        let toxicities: Vec<ToxicityScores> = records.iter().map(|r| r.toxicity).collect();

        let mood = average(&moods)
            .ok_or_else(|| AnalysisError::InvalidInput("empty batch has no summary".into()))?;
        let toxicity = average(&toxicities)
            .ok_or_else(|| AnalysisError::InvalidInput("empty batch has no summary".into()))?;

        Ok(BatchSummary {
            mood,
            toxicity,
            execution: Some(format_execution(started.elapsed())),
        })
    }

    /// Annotation entry guarded by input shape: defined for single texts
    /// only, a batch input is an invalid-usage error.
    pub async fn annotate_input(&self, input: &AnalyzeInput) -> Result<Annotation, AnalysisError> {
        match input {
            AnalyzeInput::Single { text, filters } => {
                annotate::annotate(self.vocab, text, filters).await
            }
            AnalyzeInput::Batch { .. } => Err(AnalysisError::InvalidInput(
                "annotation is defined only for single texts".into(),
            )),
        }
    }
}

/// Elapsed-time string attached to responses, e.g. `"12.345 ms"`.
fn format_execution(elapsed: Duration) -> String {
    format!("{:.3} ms", elapsed.as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(ServiceConfig::default())
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn single_text_record_is_fully_assembled() {
        let record = engine()
            .analyze_text("Привет, как дела?", &[])
            .await
            .unwrap();

        assert!(record.filters.passed);
        assert!(record.toxicity_count_tokens > 0);
        assert!(record.execution.as_deref().unwrap().ends_with(" ms"));
        // 3 distinct words, all recognized: ratio 1.0 > 0.7 ⇒ not meaningful.
        assert!(!record.meaningful);
        assert_eq!(record.meaningful_count_tokens, 3);
    }

    #[tokio::test]
    async fn batch_preserves_input_order() {
        let texts = strings(&["ужасно плохо", "отлично и прекрасно", "он шёл домой"]);
        let records = engine().analyze_batch(&texts).await.unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[0].mood.negative > records[0].mood.positive);
        assert!(records[1].mood.positive > records[1].mood.negative);
        assert_eq!(records[2].mood.neutral, 1.0);
    }

    #[tokio::test]
    async fn summary_averages_the_batch() {
        let texts = strings(&["ты дурак", "он шёл домой"]);
        let summary = engine().summarize(&texts).await.unwrap();

        let records = engine().analyze_batch(&texts).await.unwrap();
        let expected = (records[0].toxicity.insult + records[1].toxicity.insult) / 2.0;
        assert_eq!(summary.toxicity.insult, crate::score::round3(expected));
        assert!(summary.execution.is_some());
    }

    #[tokio::test]
    async fn summary_of_empty_batch_is_invalid_input() {
        let err = engine().summarize(&[]).await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn annotation_rejects_batch_input() {
        let input = AnalyzeInput::Batch {
            texts: strings(&["раз", "два"]),
        };
        let err = engine().annotate_input(&input).await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn annotation_accepts_single_input() {
        let input = AnalyzeInput::Single {
            text: "он бежал по дороге".to_string(),
            filters: strings(&["бежать"]),
        };
        let ann = engine().annotate_input(&input).await.unwrap();
        assert!(!ann.filters.passed);
    }
}
