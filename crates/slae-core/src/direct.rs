#![forbid(unsafe_code)]

//! Direct solvers: Cramer's rule, Gaussian and Gauss–Jordan elimination.

use log::{debug, trace};

use crate::error::{CRAMER_MAX_DIMENSION, Result, SolverError};
use crate::matrix::{
    assert_dimensions, back_substitution, create_augmented_matrix, determinant, replace_column,
    select_pivot, swap_rows,
};
use crate::{SolveWarning, Vector};

/// Pivot ratios below this produce an [`SolveWarning::IllConditioned`] notice.
pub const ILL_CONDITIONED_PIVOT_RATIO: f64 = 1e-12;

/// Smallest and largest pivot magnitude seen during an elimination.
///
/// `min / max` is an O(1) lower-bound style estimate of the reciprocal
/// condition number, in the spirit of reading it off the diagonal of `U`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotSpread {
    pub min: f64,
    pub max: f64,
}

impl PivotSpread {
    fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: 0.0,
        }
    }

    fn observe(&mut self, pivot: f64) {
        let magnitude = pivot.abs();
        self.min = self.min.min(magnitude);
        self.max = self.max.max(magnitude);
    }

    #[must_use]
    pub fn reciprocal_condition(&self) -> f64 {
        if self.max == 0.0 || !self.min.is_finite() {
            return 0.0;
        }
        self.min / self.max
    }

    #[must_use]
    pub fn warning(&self) -> Option<SolveWarning> {
        let rcond = self.reciprocal_condition();
        (rcond < ILL_CONDITIONED_PIVOT_RATIO).then_some(SolveWarning::IllConditioned {
            reciprocal_condition: rcond,
        })
    }
}

/// Cramer's rule, `x_i = det(A_i) / det(A)`. Only for `n <= 4`.
pub fn cramer(a: &[Vec<f64>], b: &[f64]) -> Result<Vector> {
    let n = assert_dimensions(a, b)?;
    if n > CRAMER_MAX_DIMENSION {
        return Err(SolverError::UnsupportedSize {
            n,
            max: CRAMER_MAX_DIMENSION,
        });
    }
    let det_a = determinant(a)?;
    if det_a.abs() < f64::EPSILON {
        debug!("cramer: det(A) = {det_a:e} is below machine epsilon");
        return Err(SolverError::Singular);
    }

    (0..n)
        .map(|i| -> Result<f64> {
            let a_i = replace_column(a, i, b)?;
            Ok(determinant(&a_i)? / det_a)
        })
        .collect()
}

/// Gaussian elimination with partial pivoting followed by back substitution.
pub fn gauss(a: &[Vec<f64>], b: &[f64]) -> Result<Vector> {
    gauss_with_pivots(a, b).map(|(x, _)| x)
}

pub(crate) fn gauss_with_pivots(a: &[Vec<f64>], b: &[f64]) -> Result<(Vector, PivotSpread)> {
    let n = assert_dimensions(a, b)?;
    let mut augmented = create_augmented_matrix(a, b)?;
    let mut spread = PivotSpread::new();

    for i in 0..n {
        let pivot_row = pivot_into_place(&mut augmented, i)?;
        trace!("gauss: column {i} pivot row {pivot_row}");
        let pivot = augmented[i][i];
        spread.observe(pivot);

        for r in (i + 1)..n {
            let factor = augmented[r][i] / pivot;
            for c in i..=n {
                augmented[r][c] -= factor * augmented[i][c];
            }
        }
    }

    let (upper, y): (Vec<Vec<f64>>, Vec<f64>) = augmented
        .into_iter()
        .map(|mut row| {
            let rhs = row.pop().unwrap_or_default();
            (row, rhs)
        })
        .unzip();
    Ok((back_substitution(&upper, &y)?, spread))
}

/// Gauss–Jordan elimination: reduce the coefficient block to the identity
/// and read the solution off the augmented column.
pub fn gauss_jordan(a: &[Vec<f64>], b: &[f64]) -> Result<Vector> {
    gauss_jordan_with_pivots(a, b).map(|(x, _)| x)
}

pub(crate) fn gauss_jordan_with_pivots(
    a: &[Vec<f64>],
    b: &[f64],
) -> Result<(Vector, PivotSpread)> {
    let n = assert_dimensions(a, b)?;
    let mut augmented = create_augmented_matrix(a, b)?;
    let mut spread = PivotSpread::new();

    for i in 0..n {
        let pivot_row = pivot_into_place(&mut augmented, i)?;
        trace!("gauss-jordan: column {i} pivot row {pivot_row}");
        let pivot = augmented[i][i];
        spread.observe(pivot);

        for value in &mut augmented[i] {
            *value /= pivot;
        }
        let pivot_values = augmented[i].clone();
        for (r, row) in augmented.iter_mut().enumerate() {
            if r == i {
                continue;
            }
            let factor = row[i];
            for (cell, pivot_value) in row.iter_mut().zip(&pivot_values) {
                *cell -= factor * pivot_value;
            }
        }
    }

    Ok((augmented.into_iter().map(|row| row[n]).collect(), spread))
}

/// Selects the pivot for `column`, fails on a near-zero pivot and swaps it
/// into row `column`. Returns the original index of the pivot row.
fn pivot_into_place(augmented: &mut [Vec<f64>], column: usize) -> Result<usize> {
    let pivot_row = select_pivot(augmented, column, column);
    if augmented[pivot_row][column].abs() < f64::EPSILON {
        debug!("elimination: no usable pivot in column {column}");
        return Err(SolverError::Singular);
    }
    if pivot_row != column {
        swap_rows(augmented, pivot_row, column);
    }
    Ok(pivot_row)
}
