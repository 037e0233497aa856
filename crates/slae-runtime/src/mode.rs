#![forbid(unsafe_code)]

//! Runtime mode definitions for Strict and Hardened operation.

use serde::{Deserialize, Serialize};

/// Operational mode governing input validation.
///
/// - **Strict**: Validate exactly what the caller asks for; finite checks
///   follow the `check_finite` flag on the solve options.
/// - **Hardened**: Always reject NaN/infinite coefficients, regardless of
///   `check_finite`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuntimeMode {
    #[default]
    Strict,
    Hardened,
}

impl RuntimeMode {
    /// Whether finite checks run for the given caller preference.
    #[must_use]
    pub fn requires_finite_check(self, check_finite: bool) -> bool {
        check_finite || self == Self::Hardened
    }
}
