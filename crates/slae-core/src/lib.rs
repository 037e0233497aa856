#![forbid(unsafe_code)]

//! Direct and iterative solvers for small dense systems `A·x = b`.
//!
//! [`solve_slae`] is the single entry point: it validates the system, routes
//! to the selected [`Method`], verifies the solution against the residual
//! bound and returns a [`SolveResult`].

pub mod direct;
pub mod error;
pub mod iterative;
pub mod matrix;
pub mod types;
pub mod verify;

pub use direct::{PivotSpread, cramer, gauss, gauss_jordan};
pub use error::{CRAMER_MAX_DIMENSION, Result, SolverError};
pub use iterative::{
    IterativeSolution, SweepMonitor, Unmonitored, jacobi, jacobi_monitored, seidel,
    seidel_monitored,
};
pub use matrix::{
    assert_dimensions, back_substitution, clone_matrix, create_augmented_matrix, determinant,
    is_square, multiply_matrix_vector, norm, replace_column, subtract_vectors, swap_rows,
};
pub use types::{
    DEFAULT_EPSILON, DEFAULT_MAX_ITERATIONS, IterationInfo, Matrix, Method, ParseMethodError,
    SolveOptions, SolveResult, SolveWarning, Vector,
};
pub use verify::{check_solution, residual_norm};

use log::{debug, warn};
use slae_runtime::{SolveEvidenceEntry, SolveEvidenceLedger};

use crate::direct::{gauss_jordan_with_pivots, gauss_with_pivots};
use crate::matrix::validate_finite;

/// Solve `A·x = b` with `method`.
///
/// # Contract
/// - `A` must be non-empty and square, `b.len()` must equal its dimension.
/// - `options.epsilon` must be positive and finite; it is the iterative
///   stopping tolerance and the residual bound behind `is_valid`.
/// - Iterative methods attach their sweep history as
///   [`SolveResult::iterations`]; direct methods leave it `None`.
/// - Neither `a` nor `b` is modified.
pub fn solve_slae(
    method: Method,
    a: &[Vec<f64>],
    b: &[f64],
    options: &SolveOptions,
) -> Result<SolveResult> {
    solve_slae_with_monitor(method, a, b, options, &mut Unmonitored)
}

/// [`solve_slae`] with a per-sweep hook for iterative methods.
///
/// `monitor` is polled after every Jacobi/Seidel sweep that has not yet met
/// the tolerance; returning `ControlFlow::Break` aborts with
/// [`SolverError::Cancelled`]. A converged sweep is returned as `Ok` without
/// consulting the monitor. Direct methods never call it.
pub fn solve_slae_with_monitor(
    method: Method,
    a: &[Vec<f64>],
    b: &[f64],
    options: &SolveOptions,
    monitor: &mut dyn SweepMonitor,
) -> Result<SolveResult> {
    let n = validate_system(a, b, options)?;
    debug!("solve_slae: method={method} n={n} mode={:?}", options.mode);

    let mut warnings = Vec::new();
    let (solution, iterations, iteration_count) = match method {
        Method::Cramer => {
            if n > CRAMER_MAX_DIMENSION {
                return Err(SolverError::UnsupportedSize {
                    n,
                    max: CRAMER_MAX_DIMENSION,
                });
            }
            (cramer(a, b)?, None, None)
        }
        Method::Gauss => {
            let (x, spread) = gauss_with_pivots(a, b)?;
            warnings.extend(spread.warning());
            (x, None, None)
        }
        Method::GaussJordan => {
            let (x, spread) = gauss_jordan_with_pivots(a, b)?;
            warnings.extend(spread.warning());
            (x, None, None)
        }
        Method::Jacobi => iteration_parts(jacobi_monitored(a, b, options, monitor)?),
        Method::Seidel => iteration_parts(seidel_monitored(a, b, options, monitor)?),
    };

    let residual = residual_norm(a, b, &solution)?;
    let is_valid = residual < options.epsilon;
    for warning in &warnings {
        warn!("{method}: {warning}");
    }
    debug!("solve_slae: method={method} residual={residual:e} valid={is_valid}");

    Ok(SolveResult {
        method,
        solution,
        iterations,
        iteration_count,
        is_valid,
        residual_norm: residual,
        warnings,
    })
}

/// [`solve_slae`], appending one evidence entry per call to `ledger`,
/// whether the solve succeeds or fails.
pub fn solve_slae_recorded(
    method: Method,
    a: &[Vec<f64>],
    b: &[f64],
    options: &SolveOptions,
    ledger: &mut SolveEvidenceLedger,
) -> Result<SolveResult> {
    let outcome = solve_slae(method, a, b, options);
    let entry = match &outcome {
        Ok(result) => SolveEvidenceEntry::solved(method.tag(), a.len(), options.mode)
            .with_iterations(result.iteration_count)
            .with_verification(result.residual_norm, result.is_valid)
            .with_warning_count(result.warnings.len()),
        Err(err) => SolveEvidenceEntry::failed(method.tag(), a.len(), options.mode, err.to_string())
            .with_iterations(err.partial_trace().map(<[Vector]>::len)),
    };
    ledger.record(entry);
    outcome
}

fn validate_system(a: &[Vec<f64>], b: &[f64], options: &SolveOptions) -> Result<usize> {
    let n = assert_dimensions(a, b)?;
    if !(options.epsilon.is_finite() && options.epsilon > 0.0) {
        return Err(SolverError::InvalidTolerance {
            epsilon: options.epsilon,
        });
    }
    if let Some(guess) = &options.initial_guess
        && guess.len() != n
    {
        return Err(SolverError::DimensionMismatch {
            context: "initial guess length",
            expected: n,
            actual: guess.len(),
        });
    }
    validate_finite(a, b, options.mode, options.check_finite)?;
    Ok(n)
}

fn iteration_parts(
    outcome: IterativeSolution,
) -> (Vector, Option<Vec<IterationInfo>>, Option<usize>) {
    let iterations = outcome
        .trace
        .into_iter()
        .enumerate()
        .map(|(idx, vector)| IterationInfo {
            iteration: idx + 1,
            vector,
            diff: None,
        })
        .collect();
    (
        outcome.solution,
        Some(iterations),
        Some(outcome.iteration_count),
    )
}
