#![forbid(unsafe_code)]

//! Dense matrix/vector primitives shared by every solver.
//!
//! All functions borrow their inputs; anything that needs to mutate works on
//! a private copy, so the caller's matrix is never touched.

use slae_runtime::RuntimeMode;

use crate::error::{Result, SolverError};
use crate::{Matrix, Vector};

#[must_use]
pub fn clone_matrix(a: &[Vec<f64>]) -> Matrix {
    a.iter().map(|row| row.to_vec()).collect()
}

/// Non-empty and every row as long as the row count.
#[must_use]
pub fn is_square(a: &[Vec<f64>]) -> bool {
    !a.is_empty() && a.iter().all(|row| row.len() == a.len())
}

/// Checks that `a` is square and `b` has one entry per row; returns `n`.
pub fn assert_dimensions(a: &[Vec<f64>], b: &[f64]) -> Result<usize> {
    ensure_square(a)?;
    let n = a.len();
    if b.len() != n {
        return Err(SolverError::DimensionMismatch {
            context: "right-hand side length",
            expected: n,
            actual: b.len(),
        });
    }
    Ok(n)
}

pub(crate) fn ensure_square(a: &[Vec<f64>]) -> Result<()> {
    if a.is_empty() {
        return Err(SolverError::DimensionMismatch {
            context: "matrix must have at least one row",
            expected: 1,
            actual: 0,
        });
    }
    if let Some(row) = a.iter().find(|row| row.len() != a.len()) {
        return Err(SolverError::NotSquare {
            rows: a.len(),
            cols: row.len(),
        });
    }
    Ok(())
}

pub fn swap_rows(m: &mut [Vec<f64>], i: usize, j: usize) {
    m.swap(i, j);
}

/// Row in `start..` with the largest `|m[row][column]|`; the first one wins on ties.
/// Callers guarantee `start < m.len()`.
#[must_use]
pub(crate) fn select_pivot(m: &[Vec<f64>], column: usize, start: usize) -> usize {
    let mut pivot_row = start;
    for r in (start + 1)..m.len() {
        if m[r][column].abs() > m[pivot_row][column].abs() {
            pivot_row = r;
        }
    }
    pivot_row
}

/// Determinant by partial-pivoted elimination on a private copy.
///
/// A pivot below machine epsilon means the matrix is numerically singular
/// and the result is exactly `0.0`.
pub fn determinant(a: &[Vec<f64>]) -> Result<f64> {
    ensure_square(a)?;
    let n = a.len();
    let mut m = clone_matrix(a);
    let mut det = 1.0;
    for i in 0..n {
        let pivot_row = select_pivot(&m, i, i);
        if m[pivot_row][i].abs() < f64::EPSILON {
            return Ok(0.0);
        }
        if pivot_row != i {
            swap_rows(&mut m, pivot_row, i);
            det = -det;
        }
        let pivot = m[i][i];
        det *= pivot;
        for r in (i + 1)..n {
            let factor = m[r][i] / pivot;
            for c in i..n {
                m[r][c] -= factor * m[i][c];
            }
        }
    }
    Ok(det)
}

/// Euclidean (L2) norm.
#[must_use]
pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|value| value * value).sum::<f64>().sqrt()
}

pub fn subtract_vectors(a: &[f64], b: &[f64]) -> Result<Vector> {
    if a.len() != b.len() {
        return Err(SolverError::DimensionMismatch {
            context: "vector subtraction",
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

pub fn multiply_matrix_vector(a: &[Vec<f64>], x: &[f64]) -> Result<Vector> {
    if let Some(row) = a.iter().find(|row| row.len() != x.len()) {
        return Err(SolverError::DimensionMismatch {
            context: "matrix columns vs vector length",
            expected: row.len(),
            actual: x.len(),
        });
    }
    if a.is_empty() && !x.is_empty() {
        return Err(SolverError::DimensionMismatch {
            context: "matrix columns vs vector length",
            expected: 0,
            actual: x.len(),
        });
    }
    Ok(a.iter()
        .map(|row| row.iter().zip(x).map(|(a_ij, x_j)| a_ij * x_j).sum())
        .collect())
}

/// Copy of `a` with column `column` replaced by `v`.
pub fn replace_column(a: &[Vec<f64>], column: usize, v: &[f64]) -> Result<Matrix> {
    if column >= a.len() {
        return Err(SolverError::DimensionMismatch {
            context: "replacement column index out of range",
            expected: a.len(),
            actual: column,
        });
    }
    if a.len() != v.len() {
        return Err(SolverError::DimensionMismatch {
            context: "replacement column length",
            expected: a.len(),
            actual: v.len(),
        });
    }
    Ok(a.iter()
        .zip(v)
        .map(|(row, &value)| {
            let mut row = row.clone();
            if let Some(cell) = row.get_mut(column) {
                *cell = value;
            }
            row
        })
        .collect())
}

/// `[A | b]`.
pub fn create_augmented_matrix(a: &[Vec<f64>], b: &[f64]) -> Result<Matrix> {
    if a.len() != b.len() {
        return Err(SolverError::DimensionMismatch {
            context: "right-hand side length",
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.iter()
        .zip(b)
        .map(|(row, &rhs)| {
            let mut augmented = Vec::with_capacity(row.len() + 1);
            augmented.extend_from_slice(row);
            augmented.push(rhs);
            augmented
        })
        .collect())
}

/// Solves the upper-triangular system `U x = y` bottom-up.
pub fn back_substitution(u: &[Vec<f64>], y: &[f64]) -> Result<Vector> {
    ensure_square(u)?;
    let n = u.len();
    if y.len() != n {
        return Err(SolverError::DimensionMismatch {
            context: "right-hand side length",
            expected: n,
            actual: y.len(),
        });
    }
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for (j, xj) in x.iter().enumerate().skip(i + 1) {
            sum -= u[i][j] * *xj;
        }
        if u[i][i].abs() < f64::EPSILON {
            return Err(SolverError::Singular);
        }
        x[i] = sum / u[i][i];
    }
    Ok(x)
}

/// Rejects NaN/infinite entries when `check_finite` is set or the mode is Hardened.
pub fn validate_finite(
    a: &[Vec<f64>],
    b: &[f64],
    mode: RuntimeMode,
    check_finite: bool,
) -> Result<()> {
    if !mode.requires_finite_check(check_finite) {
        return Ok(());
    }
    if a.iter().flatten().chain(b).any(|v| !v.is_finite()) {
        return Err(SolverError::NonFiniteInput);
    }
    Ok(())
}
