#![forbid(unsafe_code)]

//! Residual-based solution check.

use crate::error::Result;
use crate::matrix::{multiply_matrix_vector, norm, subtract_vectors};

/// `‖A·x − b‖₂`.
pub fn residual_norm(a: &[Vec<f64>], b: &[f64], x: &[f64]) -> Result<f64> {
    let ax = multiply_matrix_vector(a, x)?;
    Ok(norm(&subtract_vectors(&ax, b)?))
}

/// True iff the residual norm is strictly below `epsilon`.
pub fn check_solution(a: &[Vec<f64>], b: &[f64], x: &[f64], epsilon: f64) -> Result<bool> {
    Ok(residual_norm(a, b, x)? < epsilon)
}
