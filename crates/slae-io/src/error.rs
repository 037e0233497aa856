#![forbid(unsafe_code)]

//! Errors raised while parsing a system from text.

use thiserror::Error;

/// Failure to read a linear system from its text layout.
///
/// Row numbers count data rows after the size line (1-based); line numbers
/// count physical lines of the input (1-based, blank lines included).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("input does not contain enough data")]
    NotEnoughData,

    #[error("invalid system size {0:?}: expected an integer")]
    InvalidDimension(String),

    #[error("system size {n} is outside the supported range {min}..={max}")]
    DimensionOutOfRange { n: i64, min: usize, max: usize },

    #[error("expected {expected} data lines after the size line, found {found}")]
    MissingRows { expected: usize, found: usize },

    #[error("invalid data on row {row}: expected {expected} values, found {found}")]
    InvalidRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {token:?} is not a number")]
    InvalidNumber { line: usize, token: String },

    #[error("unknown layout {0:?}: expected auto, augmented or split")]
    UnknownLayout(String),
}
