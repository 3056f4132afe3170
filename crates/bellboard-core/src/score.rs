//! Result scoring.
//!
//! A perfect Bell pair only ever measures `00` or `11`, so the number of
//! correlated shots is used as the fitness of a qubit pair. Both functions are
//! pure and never fail.

use serde::{Deserialize, Serialize};

use crate::counts::Counts;

/// Outcome labels that contribute to the score.
pub const CORRELATED_OUTCOMES: [&str; 2] = ["00", "11"];

/// Score of a result: `count("00") + count("11")`, absent labels counting as zero.
pub fn compute_score(result: &Counts) -> u64 {
    CORRELATED_OUTCOMES
        .iter()
        .fold(0u64, |acc, label| acc.saturating_add(result.get(label)))
}

/// Entries of `result` sorted ascending by outcome label.
pub fn to_display_sequence(result: &Counts) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = result
        .iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    entries
}

/// A finished job's histogram in display order together with its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// `(label, count)` pairs sorted by label.
    pub histogram: Vec<(String, u64)>,
    /// Correlated-outcome count.
    pub score: u64,
}

impl ScoredResult {
    /// Score a raw result.
    pub fn from_counts(result: &Counts) -> Self {
        Self {
            histogram: to_display_sequence(result),
            score: compute_score(result),
        }
    }

    /// Total number of shots in the histogram.
    pub fn total_shots(&self) -> u64 {
        self.histogram.iter().map(|(_, count)| count).sum()
    }
}
