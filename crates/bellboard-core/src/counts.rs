//! Measurement histogram as delivered by the backend.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Outcome label → shot count.
///
/// Labels are two-character bitstrings (`"00"`, `"01"`, `"10"`, `"11"`) in the
/// Bell-state scenario, but any label the backend sends is kept. Iteration
/// order is unspecified; use [`crate::to_display_sequence`] for a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(FxHashMap<String, u64>);

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `label`; absent labels count as zero.
    pub fn get(&self, label: &str) -> u64 {
        self.0.get(label).copied().unwrap_or(0)
    }

    /// Set the count for `label`, replacing any previous value.
    pub fn insert(&mut self, label: impl Into<String>, count: u64) {
        self.0.insert(label.into(), count);
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no label has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(label, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(label, count)| (label.as_str(), *count))
    }
}

impl<L: Into<String>> FromIterator<(L, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (L, u64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(label, count)| (label.into(), count))
                .collect(),
        )
    }
}
