use criterion::{Criterion, criterion_group, criterion_main};
use slae_runtime::{CancellationToken, RuntimeMode, SolveEvidenceEntry, SolveEvidenceLedger};

fn bench_ledger_record(c: &mut Criterion) {
    c.bench_function("ledger_record_256_into_64", |b| {
        b.iter(|| {
            let mut ledger = SolveEvidenceLedger::new(64);
            for i in 0..256 {
                ledger.record(
                    SolveEvidenceEntry::solved("jacobi", 4, RuntimeMode::Strict)
                        .with_iterations(Some(i)),
                );
            }
            ledger
        });
    });
}

fn bench_ledger_serialize(c: &mut Criterion) {
    let mut ledger = SolveEvidenceLedger::new(64);
    for i in 0..64 {
        ledger.record(
            SolveEvidenceEntry::solved("seidel", 8, RuntimeMode::Hardened)
                .with_iterations(Some(i))
                .with_verification(1e-9, true),
        );
    }
    c.bench_function("ledger_serialize_jsonl_64", |b| {
        b.iter(|| ledger.serialize_jsonl());
    });
}

fn bench_cancellation_poll(c: &mut Criterion) {
    let token = CancellationToken::new();
    c.bench_function("cancellation_poll", |b| {
        b.iter(|| token.is_cancelled());
    });
}

criterion_group!(
    benches,
    bench_ledger_record,
    bench_ledger_serialize,
    bench_cancellation_poll
);
criterion_main!(benches);
