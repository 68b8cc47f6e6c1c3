//! Execution result types.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregated measurement outcome counts.
///
/// Keys are classical bit-strings with one character per classical bit over
/// the alphabet {'0','1'}, highest clbit index leftmost. For the
/// teleportation circuit that reads `l2 l1 l0`: the teleported bit is the
/// leading character. A bit no measurement assigned reads '0'.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty counts table.
    pub fn new() -> Self {
        Self {
            counts: FxHashMap::default(),
        }
    }

    /// Add `n` observations of an outcome.
    pub fn insert(&mut self, outcome: impl Into<String>, n: u64) {
        *self.counts.entry(outcome.into()).or_insert(0) += n;
    }

    /// Get the count for an outcome (0 if never observed).
    pub fn get(&self, outcome: &str) -> u64 {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Number of distinct outcomes observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no outcomes were recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of observations across all outcomes.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate over (outcome, count) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// The most frequently observed outcome, if any.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, &v)| (k.as_str(), v))
    }

    /// Empirical probability that the given classical bit reads 1.
    ///
    /// `clbit` indexes from the right of the key (clbit 0 is the last
    /// character), matching the key order documented on this type.
    pub fn probability_of_one(&self, clbit: usize) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let ones: u64 = self
            .counts
            .iter()
            .filter(|(key, _)| {
                key.len() > clbit && key.as_bytes()[key.len() - 1 - clbit] == b'1'
            })
            .map(|(_, &count)| count)
            .sum();
        ones as f64 / total as f64
    }

    /// Outcomes sorted lexicographically, for deterministic reporting.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(k, _)| *k);
        entries
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (outcome, count)) in self.sorted().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{outcome}': {count}")?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (outcome, n) in iter {
            counts.insert(outcome, n);
        }
        counts
    }
}

/// The complete result of one execution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Aggregated outcome counts.
    pub counts: Counts,
    /// Number of shots this run was configured for.
    pub shots: u32,
    /// Wall-clock execution time in milliseconds, if the backend reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
    /// Name of the backend that produced the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
            backend: None,
        }
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, millis: u64) -> Self {
        self.execution_time_ms = Some(millis);
        self
    }

    /// Attach the backend name.
    #[must_use]
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Check that every shot is accounted for in the counts.
    pub fn is_complete(&self) -> bool {
        self.counts.total() == u64::from(self.shots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("000", 1);
        counts.insert("000", 1);
        counts.insert("101", 3);

        assert_eq!(counts.get("000"), 2);
        assert_eq!(counts.get("101"), 3);
        assert_eq!(counts.get("111"), 0);
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_most_frequent() {
        let mut counts = Counts::new();
        counts.insert("00", 10);
        counts.insert("11", 30);
        assert_eq!(counts.most_frequent(), Some(("11", 30)));
    }

    #[test]
    fn test_probability_of_one() {
        let mut counts = Counts::new();
        // Key order is (c2 c1 c0): clbit 2 is the leading character.
        counts.insert("100", 256);
        counts.insert("000", 768);

        assert_eq!(counts.probability_of_one(2), 0.25);
        assert_eq!(counts.probability_of_one(0), 0.0);
    }

    #[test]
    fn test_display_is_sorted() {
        let mut counts = Counts::new();
        counts.insert("11", 2);
        counts.insert("00", 1);
        assert_eq!(format!("{counts}"), "{'00': 1, '11': 2}");
    }

    #[test]
    fn test_execution_result_completeness() {
        let mut counts = Counts::new();
        counts.insert("0", 1024);
        let result = ExecutionResult::new(counts, 1024).with_backend("simulator");
        assert!(result.is_complete());
        assert_eq!(result.backend.as_deref(), Some("simulator"));
    }
}
