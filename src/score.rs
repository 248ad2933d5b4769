//! # Score Vectors & Aggregation
//! Fixed-shape probability vectors produced by the classifiers, plus the two
//! merge operations used by the service:
//!
//! - chunk merge (toxicity only): order-dependent fold over per-chunk vectors
//!   with per-field rules (running max / running average);
//! - batch merge: true arithmetic mean across N same-shaped vectors.
//!
//! Every vector field is rounded to 3 decimals at construction; intermediate
//! sums keep full precision.

use serde::{Deserialize, Serialize};

/// Round to 3 decimal places, the precision all probability fields carry
/// on the wire.
#[inline]
pub fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Five mood categories scored by the sentiment classifier.
/// Values are independent probabilities in [0,1]; they do not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodScores {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
    pub skip: f64,
    pub speech: f64,
}

impl MoodScores {
    pub fn new(positive: f64, neutral: f64, negative: f64, skip: f64, speech: f64) -> Self {
        Self {
            positive: round3(positive),
            neutral: round3(neutral),
            negative: round3(negative),
            skip: round3(skip),
            speech: round3(speech),
        }
    }
}

/// Five toxicity categories scored by the toxicity classifier.
/// Raw classifier order: [non_toxic, insult, obscenity, threat, dangerous].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToxicityScores {
    pub non_toxic: f64,
    pub insult: f64,
    pub obscenity: f64,
    pub threat: f64,
    pub dangerous: f64,
}

impl ToxicityScores {
    pub fn new(non_toxic: f64, insult: f64, obscenity: f64, threat: f64, dangerous: f64) -> Self {
        Self {
            non_toxic: round3(non_toxic),
            insult: round3(insult),
            obscenity: round3(obscenity),
            threat: round3(threat),
            dangerous: round3(dangerous),
        }
    }

    /// Build from the raw classifier output array.
    pub fn from_raw(raw: [f64; 5]) -> Self {
        Self::new(raw[0], raw[1], raw[2], raw[3], raw[4])
    }
}

/// Fixed-width field access shared by both vector shapes, so the batch
/// average is written once.
pub trait ScoreVector: Sized + Copy {
    fn to_array(self) -> [f64; 5];
    fn from_array(fields: [f64; 5]) -> Self;
}

impl ScoreVector for MoodScores {
    fn to_array(self) -> [f64; 5] {
        [self.positive, self.neutral, self.negative, self.skip, self.speech]
    }
    fn from_array(f: [f64; 5]) -> Self {
        Self::new(f[0], f[1], f[2], f[3], f[4])
    }
}

impl ScoreVector for ToxicityScores {
    fn to_array(self) -> [f64; 5] {
        [
            self.non_toxic,
            self.insult,
            self.obscenity,
            self.threat,
            self.dangerous,
        ]
    }
    fn from_array(f: [f64; 5]) -> Self {
        Self::new(f[0], f[1], f[2], f[3], f[4])
    }
}

/// Batch merge: plain per-field arithmetic mean over N vectors.
/// Order-independent. Returns `None` for an empty slice.
pub fn average<V: ScoreVector>(items: &[V]) -> Option<V> {
    if items.is_empty() {
        return None;
    }
    let mut acc = [0.0f64; 5];
    for item in items {
        let fields = item.to_array();
        for (slot, v) in acc.iter_mut().zip(fields) {
            *slot += v;
        }
    }
    let n = items.len() as f64;
    for slot in acc.iter_mut() {
        *slot /= n;
    }
    Some(V::from_array(acc))
}

/// Chunk merge for toxicity vectors, folded strictly in chunk order:
/// - `insult` and `dangerous` take the running maximum;
/// - `obscenity` and `threat` take the running average `v = (v + new) / 2`,
///   which weights later chunks more (intentionally order-dependent);
/// - `non_toxic` is not taken from any chunk: it is recomputed at the end
///   as `1 - insult`.
///
/// Returns `None` for an empty slice.
pub fn merge_toxicity_chunks(chunks: &[ToxicityScores]) -> Option<ToxicityScores> {
    let mut iter = chunks.iter();
    let first = *iter.next()?;

    let mut insult = first.insult;
    let mut dangerous = first.dangerous;
    let mut obscenity = first.obscenity;
    let mut threat = first.threat;

    for c in iter {
        insult = insult.max(c.insult);
        dangerous = dangerous.max(c.dangerous);
        obscenity = (obscenity + c.obscenity) / 2.0;
        threat = (threat + c.threat) / 2.0;
    }

    Some(ToxicityScores::new(
        1.0 - insult,
        insult,
        obscenity,
        threat,
        dangerous,
    ))
}
