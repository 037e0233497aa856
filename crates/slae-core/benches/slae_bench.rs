use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use slae_core::{Method, SolveOptions, solve_slae};

fn make_diag_dominant(n: usize) -> Vec<Vec<f64>> {
    let mut a = vec![vec![0.0; n]; n];
    for (i, row) in a.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = if i == j {
                (n as f64) * 2.0
            } else {
                1.0 / ((i as f64 - j as f64).abs() + 1.0)
            };
        }
    }
    a
}

fn make_rhs(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i + 1) as f64).collect()
}

fn bench_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_slae");
    for &n in &[2usize, 4, 10] {
        let a = make_diag_dominant(n);
        let b = make_rhs(n);
        for method in Method::ALL {
            if method == Method::Cramer && n > slae_core::CRAMER_MAX_DIMENSION {
                continue;
            }
            group.bench_with_input(BenchmarkId::new(method.tag(), n), &n, |bencher, _| {
                bencher.iter(|| solve_slae(method, &a, &b, &SolveOptions::default()).unwrap());
            });
        }
    }
    group.finish();
}

fn bench_tight_tolerance(c: &mut Criterion) {
    let a = make_diag_dominant(10);
    let b = make_rhs(10);
    let options = SolveOptions {
        epsilon: 1e-12,
        ..SolveOptions::default()
    };
    c.bench_function("seidel_10x10_eps1e-12", |bencher| {
        bencher.iter(|| solve_slae(Method::Seidel, &a, &b, &options).unwrap());
    });
}

criterion_group!(benches, bench_methods, bench_tight_tolerance);
criterion_main!(benches);
