#![forbid(unsafe_code)]

//! Value types shared by the solvers and the dispatcher.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use slae_runtime::RuntimeMode;
use thiserror::Error;

use crate::matrix::{norm, subtract_vectors};

/// Row-major dense matrix. Square wherever it pairs with a [`Vector`].
pub type Matrix = Vec<Vec<f64>>;
pub type Vector = Vec<f64>;

pub const DEFAULT_EPSILON: f64 = 1e-6;
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Method {
    Cramer,
    Gauss,
    GaussJordan,
    Jacobi,
    Seidel,
}

impl Method {
    pub const ALL: [Self; 5] = [
        Self::Cramer,
        Self::Gauss,
        Self::GaussJordan,
        Self::Jacobi,
        Self::Seidel,
    ];

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Cramer => "cramer",
            Self::Gauss => "gauss",
            Self::GaussJordan => "gaussJordan",
            Self::Jacobi => "jacobi",
            Self::Seidel => "seidel",
        }
    }

    #[must_use]
    pub const fn is_iterative(self) -> bool {
        matches!(self, Self::Jacobi | Self::Seidel)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown method `{0}` (expected one of: cramer, gauss, gaussJordan, jacobi, seidel)")]
pub struct ParseMethodError(pub String);

impl FromStr for Method {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cramer" => Ok(Self::Cramer),
            "gauss" => Ok(Self::Gauss),
            "gaussjordan" | "gauss-jordan" | "gauss_jordan" => Ok(Self::GaussJordan),
            "jacobi" => Ok(Self::Jacobi),
            "seidel" | "gauss-seidel" | "gauss_seidel" => Ok(Self::Seidel),
            _ => Err(ParseMethodError(s.to_owned())),
        }
    }
}

/// Solver configuration. `epsilon` is both the iterative stopping tolerance
/// and the residual bound used to verify every solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    pub epsilon: f64,
    pub max_iterations: usize,
    pub initial_guess: Option<Vector>,
    pub mode: RuntimeMode,
    pub check_finite: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_guess: None,
            mode: RuntimeMode::Strict,
            check_finite: true,
        }
    }
}

/// One sweep of an iterative method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationInfo {
    /// 1-based sweep number.
    pub iteration: usize,
    pub vector: Vector,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub diff: Option<f64>,
}

impl IterationInfo {
    /// Step norm for this entry: the attached `diff` if present, otherwise
    /// the Euclidean distance to `previous`. `None` for the first entry or
    /// when the vectors differ in length.
    #[must_use]
    pub fn diff_from(&self, previous: Option<&IterationInfo>) -> Option<f64> {
        self.diff.or_else(|| {
            let previous = previous?;
            subtract_vectors(&self.vector, &previous.vector)
                .ok()
                .map(|delta| norm(&delta))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolveWarning {
    IllConditioned { reciprocal_condition: f64 },
}

impl fmt::Display for SolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllConditioned {
                reciprocal_condition,
            } => write!(
                f,
                "matrix is ill-conditioned (pivot ratio {reciprocal_condition:e}); the solution may be inaccurate"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    pub method: Method,
    pub solution: Vector,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub iterations: Option<Vec<IterationInfo>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub iteration_count: Option<usize>,
    pub is_valid: bool,
    pub residual_norm: f64,
    #[serde(default)]
    pub warnings: Vec<SolveWarning>,
}

impl SolveResult {
    /// Per-entry step norms of the iteration trace (empty for direct methods).
    #[must_use]
    pub fn iteration_diffs(&self) -> Vec<Option<f64>> {
        let Some(iterations) = self.iterations.as_deref() else {
            return Vec::new();
        };
        iterations
            .iter()
            .enumerate()
            .map(|(idx, info)| info.diff_from(idx.checked_sub(1).map(|p| &iterations[p])))
            .collect()
    }
}
