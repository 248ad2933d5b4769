// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod annotate;
pub mod api;
pub mod chunker;
pub mod config;
pub mod engine;
pub mod error;
pub mod mood;
pub mod morph;
pub mod record;
pub mod score;
pub mod toxicity;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::engine::{AnalysisEngine, AnalyzeInput};
pub use crate::error::AnalysisError;
pub use crate::record::{AnalysisRecord, BatchRecord, BatchSummary, CollectionResponse};
