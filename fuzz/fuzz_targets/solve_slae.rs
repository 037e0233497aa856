#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use slae_core::{Method, SolveOptions, solve_slae};
use slae_runtime::RuntimeMode;

#[derive(Debug, Arbitrary)]
struct SolveInput {
    method: u8,
    rows: u8,
    cols: u8,
    hardened: bool,
    check_finite: bool,
    epsilon: f64,
    max_iterations: u8,
    guess: Option<Vec<f64>>,
    values: Vec<f64>,
    rhs: Vec<f64>,
}

fn build_matrix(rows: usize, cols: usize, values: &[f64]) -> Vec<Vec<f64>> {
    let mut matrix = vec![vec![0.0; cols]; rows];
    for (idx, value) in values.iter().copied().take(rows * cols).enumerate() {
        matrix[idx / cols][idx % cols] = value;
    }
    matrix
}

fn build_vector(len: usize, values: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; len];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = *value;
    }
    out
}

fuzz_target!(|input: SolveInput| {
    let method = Method::ALL[usize::from(input.method) % Method::ALL.len()];
    let rows = usize::from(input.rows % 12);
    let cols = usize::from(input.cols % 12).max(1);
    let a = build_matrix(rows, cols, &input.values);
    let b = build_vector(rows, &input.rhs);
    let options = SolveOptions {
        epsilon: input.epsilon,
        max_iterations: usize::from(input.max_iterations),
        initial_guess: input.guess.map(|g| g.into_iter().take(12).collect()),
        mode: if input.hardened {
            RuntimeMode::Hardened
        } else {
            RuntimeMode::Strict
        },
        check_finite: input.check_finite,
    };

    let before = a.clone();
    if let Ok(result) = solve_slae(method, &a, &b, &options) {
        assert_eq!(result.solution.len(), rows);
        assert_eq!(result.iterations.is_some(), method.is_iterative());
        if let (Some(iterations), Some(count)) = (&result.iterations, result.iteration_count) {
            assert_eq!(iterations.len(), count);
        }
    }
    assert!(
        a.iter()
            .flatten()
            .zip(before.iter().flatten())
            .all(|(x, y)| x.to_bits() == y.to_bits()),
        "solver mutated its input"
    );
});
