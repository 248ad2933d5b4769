//! # Chunker
//! Splits a text whose encoded length exceeds a classifier's input budget
//! into balanced sub-texts.
//!
//! The partition is balanced rather than naively sliced: for `n` tokens and
//! a budget of `max_units`, we compute `num_chunks = ceil(n / max_units)`,
//! give every chunk `n / num_chunks` tokens and hand the remainder out one
//! token at a time to the leading chunks. This avoids a tiny trailing chunk
//! that would skew the per-chunk scores.

use crate::error::AnalysisError;

/// Split `text` (already encoded into `tokens`) into chunks of at most
/// `max_units` tokens each.
///
/// - `tokens.len() <= max_units` → a single chunk equal to the input text
///   (an empty text yields one empty chunk);
/// - otherwise a balanced partition where chunk sizes differ by at most one.
///
/// A single token is never split further, so a token longer than the budget
/// still forms a one-token chunk.
pub fn split(text: &str, tokens: &[String], max_units: usize) -> Result<Vec<String>, AnalysisError> {
    if max_units == 0 {
        return Err(AnalysisError::InvalidInput(
            "chunk budget must be positive".into(),
        ));
    }
    if tokens.len() <= max_units {
        return Ok(vec![text.to_string()]);
    }

    let n = tokens.len();
    let num_chunks = n.div_ceil(max_units);
    let base = n / num_chunks;
    let remainder = n % num_chunks;

    let mut chunks = Vec::with_capacity(num_chunks);
    let mut start = 0usize;
    for i in 0..num_chunks {
        let size = base + usize::from(i < remainder);
        let decoded = tokens[start..start + size].join(" ");
        if decoded.is_empty() {
            // A non-empty token slice must decode to non-empty text.
            return Err(AnalysisError::ChunkBoundary(format!(
                "chunk {i} of {num_chunks} decoded to empty text"
            )));
        }
        chunks.push(decoded);
        start += size;
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("w{i}")).collect()
    }

    #[test]
    fn short_text_is_a_single_identical_chunk() {
        let tokens = toks(7);
        let text = "seven words of text, unchanged by the chunker";
        let chunks = split(text, &tokens, 10).unwrap();
        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn empty_text_yields_one_empty_chunk() {
        let chunks = split("", &[], 512).unwrap();
        assert_eq!(chunks, vec![String::new()]);
    }

    #[test]
    fn partition_is_balanced_and_lossless() {
        for (n, max) in [(11usize, 4usize), (100, 7), (513, 512), (1024, 512), (23, 1)] {
            let tokens = toks(n);
            let text = tokens.join(" ");
            let chunks = split(&text, &tokens, max).unwrap();

            let sizes: Vec<usize> = chunks
                .iter()
                .map(|c| c.split_whitespace().count())
                .collect();
            assert_eq!(sizes.iter().sum::<usize>(), n, "n={n} max={max}");
            let lo = *sizes.iter().min().unwrap();
            let hi = *sizes.iter().max().unwrap();
            assert!(hi - lo <= 1, "unbalanced for n={n} max={max}: {sizes:?}");
            assert!(hi <= max, "budget exceeded for n={n} max={max}");
        }
    }

    #[test]
    fn one_over_budget_splits_into_two_even_halves() {
        let tokens = toks(513);
        let text = tokens.join(" ");
        let chunks = split(&text, &tokens, 512).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].split_whitespace().count(), 257);
        assert_eq!(chunks[1].split_whitespace().count(), 256);
    }

    #[test]
    fn zero_budget_is_rejected() {
        let tokens = toks(3);
        assert!(matches!(
            split("a b c", &tokens, 0),
            Err(AnalysisError::InvalidInput(_))
        ));
    }
}
