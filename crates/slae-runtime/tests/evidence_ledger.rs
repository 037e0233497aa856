//! Property tests for the solve-evidence ledger.
//!
//! Convention: test_{module}_{function}_{scenario}

use proptest::prelude::*;
use slae_runtime::{
    RuntimeMode, SolveEvidenceEntry, SolveEvidenceLedger, SolveOutcome, TestLogEntry, TestResult,
    within_tolerance,
};

fn log_property(test_id: &str, message: &str, pass: bool) {
    let entry = TestLogEntry::new(test_id, "slae_runtime::evidence", message).with_result(
        if pass {
            TestResult::Pass
        } else {
            TestResult::Fail
        },
    );
    eprintln!("{}", entry.to_json_line());
}

// ═══════════════════════════════════════════════════════════════
// Property 1: ledger length never exceeds capacity
// ═══════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_evidence_record_is_bounded(capacity in 0usize..32, records in 0usize..128) {
        let mut ledger = SolveEvidenceLedger::new(capacity);
        for i in 0..records {
            ledger.record(
                SolveEvidenceEntry::solved("gauss", 3, RuntimeMode::Strict)
                    .with_iterations(Some(i)),
            );
        }
        let expected = records.min(capacity.max(1));
        prop_assert_eq!(ledger.len(), expected);
        if records > 0 {
            prop_assert_eq!(
                ledger.latest().and_then(|e| e.iteration_count),
                Some(records - 1)
            );
        }
        log_property("test_evidence_record_is_bounded", "length bounded by capacity", true);
    }
}

// ═══════════════════════════════════════════════════════════════
// Property 2: JSONL output round-trips entry by entry
// ═══════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn test_evidence_jsonl_round_trips(
        dimension in 1usize..10,
        residual in 0.0f64..1.0,
        failed in any::<bool>(),
    ) {
        let entry = if failed {
            SolveEvidenceEntry::failed("seidel", dimension, RuntimeMode::Hardened, "no convergence")
        } else {
            SolveEvidenceEntry::solved("seidel", dimension, RuntimeMode::Strict)
                .with_verification(residual, residual < 1e-6)
        };
        let mut ledger = SolveEvidenceLedger::new(4);
        ledger.record(entry.clone());
        let line = ledger.serialize_jsonl();
        let parsed: SolveEvidenceEntry = serde_json::from_str(&line).expect("line parses");
        prop_assert_eq!(&parsed.method, &entry.method);
        prop_assert_eq!(parsed.dimension, dimension);
        prop_assert_eq!(parsed.mode, entry.mode);
        prop_assert_eq!(&parsed.error, &entry.error);
        match (parsed.residual_norm, entry.residual_norm) {
            (Some(a), Some(e)) => prop_assert!(within_tolerance(a, e, 1e-15, 1e-12)),
            (a, e) => prop_assert_eq!(a, e),
        }
        prop_assert_eq!(
            parsed.outcome,
            if failed { SolveOutcome::Failed } else { SolveOutcome::Solved }
        );
    }
}

#[test]
fn test_evidence_empty_ledger_serializes_to_empty_string() {
    let ledger = SolveEvidenceLedger::new(4);
    assert!(ledger.is_empty());
    assert_eq!(ledger.serialize_jsonl(), "");
}
