#![forbid(unsafe_code)]

//! Fixed-point iterative solvers: Jacobi and Gauss–Seidel.
//!
//! Both share one sweep loop. A sweep recomputes every unknown once; after
//! each sweep the new iterate is appended to the trace and the step norm
//! `‖x_new − x_old‖₂` is compared with `epsilon`. Only sweeps that have not
//! converged are reported to the optional [`SweepMonitor`].

use std::ops::ControlFlow;

use log::{debug, trace};
use slae_runtime::CancellationToken;

use crate::error::{Result, SolverError};
use crate::matrix::{assert_dimensions, norm, subtract_vectors};
use crate::{SolveOptions, Vector};

/// Observer polled after every non-converged sweep; `Break` aborts the
/// solve with [`SolverError::Cancelled`]. A converged sweep always wins.
pub trait SweepMonitor {
    fn on_sweep(&mut self, iteration: usize, x: &[f64], diff: f64) -> ControlFlow<()>;
}

/// Monitor that never interrupts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unmonitored;

impl SweepMonitor for Unmonitored {
    fn on_sweep(&mut self, _iteration: usize, _x: &[f64], _diff: f64) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl SweepMonitor for CancellationToken {
    fn on_sweep(&mut self, _iteration: usize, _x: &[f64], _diff: f64) -> ControlFlow<()> {
        if self.is_cancelled() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

impl<F> SweepMonitor for F
where
    F: FnMut(usize, &[f64], f64) -> ControlFlow<()>,
{
    fn on_sweep(&mut self, iteration: usize, x: &[f64], diff: f64) -> ControlFlow<()> {
        self(iteration, x, diff)
    }
}

/// Converged iterate plus every intermediate sweep, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct IterativeSolution {
    pub solution: Vector,
    pub trace: Vec<Vector>,
    pub iteration_count: usize,
    pub last_diff: f64,
}

/// Jacobi iteration: every unknown of a sweep is computed from the previous iterate.
pub fn jacobi(a: &[Vec<f64>], b: &[f64], options: &SolveOptions) -> Result<IterativeSolution> {
    jacobi_monitored(a, b, options, &mut Unmonitored)
}

pub fn jacobi_monitored(
    a: &[Vec<f64>],
    b: &[f64],
    options: &SolveOptions,
    monitor: &mut dyn SweepMonitor,
) -> Result<IterativeSolution> {
    run_sweeps("jacobi", a, b, options, monitor, |x_old, x| {
        for (i, row) in a.iter().enumerate() {
            let diag = checked_diagonal(row, i)?;
            x[i] = off_diagonal_residual(row, b[i], i, x_old) / diag;
        }
        Ok(())
    })
}

/// Gauss–Seidel iteration: unknowns are updated in place, so later rows of a
/// sweep already see the fresh values of earlier ones.
pub fn seidel(a: &[Vec<f64>], b: &[f64], options: &SolveOptions) -> Result<IterativeSolution> {
    seidel_monitored(a, b, options, &mut Unmonitored)
}

pub fn seidel_monitored(
    a: &[Vec<f64>],
    b: &[f64],
    options: &SolveOptions,
    monitor: &mut dyn SweepMonitor,
) -> Result<IterativeSolution> {
    run_sweeps("seidel", a, b, options, monitor, |_, x| {
        for (i, row) in a.iter().enumerate() {
            let diag = checked_diagonal(row, i)?;
            x[i] = off_diagonal_residual(row, b[i], i, &x[..]) / diag;
        }
        Ok(())
    })
}

/// Starting iterate: the caller's guess or the zero vector.
pub(crate) fn initial_iterate(n: usize, options: &SolveOptions) -> Result<Vector> {
    match &options.initial_guess {
        Some(guess) if guess.len() != n => Err(SolverError::DimensionMismatch {
            context: "initial guess length",
            expected: n,
            actual: guess.len(),
        }),
        Some(guess) => Ok(guess.clone()),
        None => Ok(vec![0.0; n]),
    }
}

fn checked_diagonal(row: &[f64], i: usize) -> Result<f64> {
    let diag = row[i];
    if diag.abs() < f64::EPSILON {
        return Err(SolverError::ZeroDiagonal { row: i });
    }
    Ok(diag)
}

/// `b_i − Σ_{j≠i} a_ij·x_j`.
fn off_diagonal_residual(row: &[f64], b_i: f64, i: usize, x: &[f64]) -> f64 {
    row.iter()
        .zip(x)
        .enumerate()
        .filter(|(j, _)| *j != i)
        .fold(b_i, |sum, (_, (a_ij, x_j))| sum - a_ij * x_j)
}

fn run_sweeps<S>(
    name: &'static str,
    a: &[Vec<f64>],
    b: &[f64],
    options: &SolveOptions,
    monitor: &mut dyn SweepMonitor,
    mut sweep: S,
) -> Result<IterativeSolution>
where
    S: FnMut(&[f64], &mut Vector) -> Result<()>,
{
    let n = assert_dimensions(a, b)?;
    let mut x = initial_iterate(n, options)?;
    let mut sweeps = Vec::new();
    let mut last_diff = f64::INFINITY;

    for iteration in 1..=options.max_iterations {
        let x_old = x.clone();
        sweep(&x_old, &mut x)?;
        last_diff = norm(&subtract_vectors(&x, &x_old)?);
        sweeps.push(x.clone());
        trace!("{name}: sweep {iteration} step norm {last_diff:e}");

        if last_diff < options.epsilon {
            debug!("{name}: converged after {iteration} sweeps");
            return Ok(IterativeSolution {
                solution: x,
                trace: sweeps,
                iteration_count: iteration,
                last_diff,
            });
        }
        if monitor.on_sweep(iteration, &x, last_diff).is_break() {
            debug!("{name}: cancelled after sweep {iteration}");
            return Err(SolverError::Cancelled {
                iteration,
                trace: sweeps,
            });
        }
    }

    debug!(
        "{name}: no convergence within {} sweeps (last step norm {last_diff:e})",
        options.max_iterations
    );
    Err(SolverError::NonConvergence {
        max_iterations: options.max_iterations,
        last_diff,
        trace: sweeps,
    })
}
