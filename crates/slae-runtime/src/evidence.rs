#![forbid(unsafe_code)]

//! Bounded FIFO evidence ledger for the solve audit trail.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::mode::RuntimeMode;

/// How a recorded solve call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveOutcome {
    Solved,
    Failed,
}

/// Complete record of a single solve call for audit/forensic analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveEvidenceEntry {
    pub timestamp_ms: u64,
    pub method: String,
    pub dimension: usize,
    pub mode: RuntimeMode,
    pub outcome: SolveOutcome,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub iteration_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub residual_norm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_valid: Option<bool>,
    #[serde(default)]
    pub warning_count: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl SolveEvidenceEntry {
    /// Entry for a call that produced a solution.
    #[must_use]
    pub fn solved(method: impl Into<String>, dimension: usize, mode: RuntimeMode) -> Self {
        Self {
            timestamp_ms: crate::now_unix_ms(),
            method: method.into(),
            dimension,
            mode,
            outcome: SolveOutcome::Solved,
            iteration_count: None,
            residual_norm: None,
            is_valid: None,
            warning_count: 0,
            error: None,
        }
    }

    /// Entry for a call that aborted with an error.
    #[must_use]
    pub fn failed(
        method: impl Into<String>,
        dimension: usize,
        mode: RuntimeMode,
        error: impl Into<String>,
    ) -> Self {
        Self {
            outcome: SolveOutcome::Failed,
            error: Some(error.into()),
            ..Self::solved(method, dimension, mode)
        }
    }

    #[must_use]
    pub fn with_iterations(mut self, iteration_count: Option<usize>) -> Self {
        self.iteration_count = iteration_count;
        self
    }

    #[must_use]
    pub fn with_verification(mut self, residual_norm: f64, is_valid: bool) -> Self {
        self.residual_norm = Some(residual_norm);
        self.is_valid = Some(is_valid);
        self
    }

    #[must_use]
    pub fn with_warning_count(mut self, warning_count: usize) -> Self {
        self.warning_count = warning_count;
        self
    }
}

/// Bounded FIFO evidence buffer recording solve calls.
///
/// Capacity is enforced via `capacity.max(1)`. When full, the oldest entry
/// is evicted before a new one is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveEvidenceLedger {
    capacity: usize,
    entries: VecDeque<SolveEvidenceEntry>,
}

impl SolveEvidenceLedger {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        }
    }

    /// Append an entry, evicting the oldest if at capacity.
    pub fn record(&mut self, entry: SolveEvidenceEntry) {
        if self.entries.len() == self.capacity {
            let _ = self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently recorded entry.
    #[must_use]
    pub fn latest(&self) -> Option<&SolveEvidenceEntry> {
        self.entries.back()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &SolveEvidenceEntry> {
        self.entries.iter()
    }

    /// One JSON object per line, oldest first.
    #[must_use]
    pub fn serialize_jsonl(&self) -> String {
        self.entries
            .iter()
            .filter_map(|e| serde_json::to_string(e).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(method: &str) -> SolveEvidenceEntry {
        SolveEvidenceEntry::solved(method, 3, RuntimeMode::Strict)
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut ledger = SolveEvidenceLedger::new(0);
        assert_eq!(ledger.capacity(), 1);
        ledger.record(entry("gauss"));
        ledger.record(entry("jacobi"));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.latest().map(|e| e.method.as_str()), Some("jacobi"));
    }

    #[test]
    fn oldest_entry_is_evicted_first() {
        let mut ledger = SolveEvidenceLedger::new(2);
        for method in ["cramer", "gauss", "seidel"] {
            ledger.record(entry(method));
        }
        let methods: Vec<&str> = ledger.entries().map(|e| e.method.as_str()).collect();
        assert_eq!(methods, vec!["gauss", "seidel"]);
    }

    #[test]
    fn failed_entry_carries_error_and_outcome() {
        let e = SolveEvidenceEntry::failed("gauss", 2, RuntimeMode::Hardened, "singular matrix");
        assert_eq!(e.outcome, SolveOutcome::Failed);
        assert_eq!(e.error.as_deref(), Some("singular matrix"));
        assert_eq!(e.mode, RuntimeMode::Hardened);
    }

    #[test]
    fn jsonl_has_one_line_per_entry_and_omits_empty_fields() {
        let mut ledger = SolveEvidenceLedger::new(8);
        ledger.record(entry("gauss").with_verification(1e-15, true));
        ledger.record(
            entry("jacobi")
                .with_iterations(Some(12))
                .with_verification(1e-9, true),
        );
        let jsonl = ledger.serialize_jsonl();
        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).expect("valid JSON");
        assert_eq!(first["method"], "gauss");
        assert_eq!(first["outcome"], "solved");
        assert!(first.get("iteration_count").is_none());
        assert!(first.get("error").is_none());

        let second: SolveEvidenceEntry = serde_json::from_str(lines[1]).expect("entry parses");
        assert_eq!(second.iteration_count, Some(12));
        assert_eq!(second.is_valid, Some(true));
    }
}
