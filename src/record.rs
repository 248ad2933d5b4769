//! Wire-facing result records. Field names are fixed for compatibility with
//! existing consumers of the service.

use serde::Serialize;

use crate::annotate::{ArtifactMap, WordFilterResult};
use crate::score::{MoodScores, ToxicityScores};

/// Full result for one analyzed text. Built once per request and immutable
/// after assembly.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRecord {
    pub mood: MoodScores,
    pub toxicity: ToxicityScores,
    pub toxicity_count_tokens: usize,
    /// Entity-type buckets; empty buckets are never present.
    pub artifacts: ArtifactMap,
    pub filters: WordFilterResult,
    pub meaningful: bool,
    pub meaningful_count_tokens: usize,
    /// Elapsed request time, e.g. `"12.345 ms"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution: Option<String>,
}

/// Per-item result in batch mode: mood and toxicity only, no annotation.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRecord {
    pub mood: MoodScores,
    pub toxicity: ToxicityScores,
    pub toxicity_count_tokens: usize,
}

/// Response for the collection endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionResponse {
    pub results: Vec<BatchRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution: Option<String>,
}

/// Averaged mood and toxicity across a batch; computed on demand,
/// never stored.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub mood: MoodScores,
    pub toxicity: ToxicityScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution: Option<String>,
}
