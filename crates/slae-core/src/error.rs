#![forbid(unsafe_code)]

//! Error types for slae-core.

use thiserror::Error;

use crate::Vector;

/// Largest system Cramer's rule accepts.
pub const CRAMER_MAX_DIMENSION: usize = 4;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("dimension mismatch ({context}): expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("coefficient matrix must be square, got {rows} rows with a row of length {cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Cramer's rule supports systems up to size {max}, got {n}")]
    UnsupportedSize { n: usize, max: usize },

    #[error("matrix is singular or nearly singular")]
    Singular,

    #[error("zero diagonal element in row {row}")]
    ZeroDiagonal { row: usize },

    #[error(
        "did not converge within {max_iterations} iterations (last step norm {last_diff:e})"
    )]
    NonConvergence {
        max_iterations: usize,
        last_diff: f64,
        trace: Vec<Vector>,
    },

    #[error("cancelled after iteration {iteration}")]
    Cancelled { iteration: usize, trace: Vec<Vector> },

    #[error("tolerance must be a positive finite number, got {epsilon}")]
    InvalidTolerance { epsilon: f64 },

    #[error("array must not contain infs or NaNs")]
    NonFiniteInput,
}

impl SolverError {
    /// Partial iteration trace carried by an aborted iterative solve.
    #[must_use]
    pub fn partial_trace(&self) -> Option<&[Vector]> {
        match self {
            Self::NonConvergence { trace, .. } | Self::Cancelled { trace, .. } => Some(trace),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SolverError>;
