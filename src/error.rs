//! Error taxonomy for the analysis core.
//!
//! Every stage error propagates unmodified to the orchestrator, which fails
//! the whole request; no error is downgraded to a default score.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The caller asked for something the contract does not allow,
    /// e.g. annotation over a batch input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A chunk produced by the chunker could not be decoded back to text.
    #[error("chunk boundary: {0}")]
    ChunkBoundary(String),

    /// The underlying classifier call failed.
    #[error("inference unavailable: {0}")]
    InferenceUnavailable(String),

    /// A spawned analysis task panicked or was cancelled.
    #[error("analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
