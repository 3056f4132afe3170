//! Leaderboard entries and ranking.

use serde::{Deserialize, Serialize};

use crate::counts::Counts;
use crate::score::compute_score;

/// One historical submission as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRecord {
    /// Submitting user.
    pub username: String,
    /// First physical qubit.
    #[serde(rename = "q1")]
    pub qubit_a: u32,
    /// Second physical qubit.
    #[serde(rename = "q2")]
    pub qubit_b: u32,
    /// Measurement histogram.
    pub result: Counts,
}

/// A record with its derived score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Submitting user.
    pub username: String,
    /// First physical qubit.
    #[serde(rename = "q1")]
    pub qubit_a: u32,
    /// Second physical qubit.
    #[serde(rename = "q2")]
    pub qubit_b: u32,
    /// Measurement histogram.
    pub result: Counts,
    /// Correlated-outcome count; computed locally, never transmitted.
    pub score: u64,
}

impl From<LeaderboardRecord> for LeaderboardEntry {
    fn from(record: LeaderboardRecord) -> Self {
        let score = compute_score(&record.result);
        Self {
            username: record.username,
            qubit_a: record.qubit_a,
            qubit_b: record.qubit_b,
            result: record.result,
            score,
        }
    }
}

impl LeaderboardEntry {
    /// The qubit pair as `(q1, q2)`.
    pub fn qubits(&self) -> (u32, u32) {
        (self.qubit_a, self.qubit_b)
    }
}

/// Score every record and sort by score, highest first.
///
/// The sort is stable: records with equal scores keep the listing order.
pub fn rank(records: Vec<LeaderboardRecord>) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = records.into_iter().map(Into::into).collect();
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}
