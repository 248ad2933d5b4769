//! Service configuration from environment variables (with `.env` support
//! loaded in `main`). Every knob has a default, so the service boots with no
//! configuration at all.

use std::env;

pub const ENV_BIND_ADDR: &str = "ANALYZER_BIND";
pub const ENV_MAX_TOKENS: &str = "TOXICITY_MAX_TOKENS";
pub const ENV_WORKERS: &str = "ANALYZER_WORKERS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MAX_TOKENS: usize = 512;
const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,
    /// Token budget of the toxicity classifier; longer texts are chunked.
    pub max_chunk_tokens: usize,
    /// Upper bound on concurrently analyzed batch items.
    pub workers: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_chunk_tokens: DEFAULT_MAX_TOKENS,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            max_chunk_tokens: parse_env(ENV_MAX_TOKENS, DEFAULT_MAX_TOKENS),
            workers: parse_env(ENV_WORKERS, DEFAULT_WORKERS),
        }
    }
}

/// Parse a positive integer env var, falling back to the default on absence,
/// parse failure, or zero.
fn parse_env(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default)
}
