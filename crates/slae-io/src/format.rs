#![forbid(unsafe_code)]

//! The two on-disk layouts of a system `(n, A, B)`.
//!
//! ```text
//! augmented          split
//! 2                  2
//! 4 1 9              4 1
//! 1 3 7              1 3
//!                    9
//!                    7
//! ```
//!
//! Augmented is the canonical layout and the one [`render_system`] writes.
//! Split is accepted for older input files.

use std::fmt;
use std::str::FromStr;

use log::debug;
use slae_core::{Matrix, Vector};

use crate::error::ParseError;

pub const MIN_DIMENSION: usize = 2;
pub const MAX_DIMENSION: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Pick Augmented or Split from the width of the first data row.
    #[default]
    Auto,
    Augmented,
    Split,
}

impl Layout {
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Augmented => "augmented",
            Self::Split => "split",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Layout {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "augmented" => Ok(Self::Augmented),
            "split" | "legacy" => Ok(Self::Split),
            other => Err(ParseError::UnknownLayout(other.to_string())),
        }
    }
}

/// A parsed system: square `a` and right-hand side `b` of equal dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    pub a: Matrix,
    pub b: Vector,
}

impl LinearSystem {
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.b.len()
    }
}

/// A non-blank, trimmed input line with its 1-based physical line number.
#[derive(Debug, Clone, Copy)]
struct DataLine<'a> {
    line: usize,
    text: &'a str,
}

impl DataLine<'_> {
    fn width(&self) -> usize {
        self.text.split_whitespace().count()
    }

    fn values(&self) -> Result<Vector, ParseError> {
        self.text
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| ParseError::InvalidNumber {
                        line: self.line,
                        token: token.to_string(),
                    })
            })
            .collect()
    }
}

/// Parse `text` as a system in `layout`.
///
/// Blank lines are skipped and lines past the payload are ignored. Every
/// value must be a finite number; `nan`, `inf` and overflowing literals are
/// rejected.
pub fn parse_system(text: &str, layout: Layout) -> Result<LinearSystem, ParseError> {
    let lines: Vec<DataLine<'_>> = text
        .lines()
        .enumerate()
        .map(|(idx, raw)| DataLine {
            line: idx + 1,
            text: raw.trim(),
        })
        .filter(|l| !l.text.is_empty())
        .collect();

    let [size_line, rows @ ..] = lines.as_slice() else {
        return Err(ParseError::NotEnoughData);
    };
    if rows.is_empty() {
        return Err(ParseError::NotEnoughData);
    }
    let n = parse_dimension(size_line.text)?;

    let layout = match layout {
        Layout::Auto => detect_layout(n, &rows[0])?,
        fixed => fixed,
    };
    debug!("parse_system: n={n} layout={layout}");

    if layout == Layout::Split {
        parse_split(n, rows)
    } else {
        parse_augmented(n, rows)
    }
}

fn parse_dimension(text: &str) -> Result<usize, ParseError> {
    let n: i64 = text
        .parse()
        .map_err(|_| ParseError::InvalidDimension(text.to_string()))?;
    usize::try_from(n)
        .ok()
        .filter(|n| (MIN_DIMENSION..=MAX_DIMENSION).contains(n))
        .ok_or(ParseError::DimensionOutOfRange {
            n,
            min: MIN_DIMENSION,
            max: MAX_DIMENSION,
        })
}

fn detect_layout(n: usize, first_row: &DataLine<'_>) -> Result<Layout, ParseError> {
    match first_row.width() {
        w if w == n + 1 => Ok(Layout::Augmented),
        w if w == n => Ok(Layout::Split),
        found => Err(ParseError::InvalidRow {
            row: 1,
            expected: n + 1,
            found,
        }),
    }
}

fn parse_augmented(n: usize, rows: &[DataLine<'_>]) -> Result<LinearSystem, ParseError> {
    if rows.len() < n {
        return Err(ParseError::MissingRows {
            expected: n,
            found: rows.len(),
        });
    }
    let mut a = Vec::with_capacity(n);
    let mut b = Vec::with_capacity(n);
    for (idx, row) in rows[..n].iter().enumerate() {
        let mut values = expect_width(row, idx + 1, n + 1)?;
        b.push(values.pop().unwrap_or_default());
        a.push(values);
    }
    Ok(LinearSystem { a, b })
}

fn parse_split(n: usize, rows: &[DataLine<'_>]) -> Result<LinearSystem, ParseError> {
    if rows.len() < 2 * n {
        return Err(ParseError::MissingRows {
            expected: 2 * n,
            found: rows.len(),
        });
    }
    let (matrix_rows, rhs_rows) = rows[..2 * n].split_at(n);
    let a = matrix_rows
        .iter()
        .enumerate()
        .map(|(idx, row)| expect_width(row, idx + 1, n))
        .collect::<Result<Matrix, _>>()?;
    let b = rhs_rows
        .iter()
        .enumerate()
        .map(|(idx, row)| expect_width(row, n + idx + 1, 1).map(|v| v[0]))
        .collect::<Result<Vector, _>>()?;
    Ok(LinearSystem { a, b })
}

fn expect_width(row: &DataLine<'_>, index: usize, expected: usize) -> Result<Vector, ParseError> {
    let values = row.values()?;
    if values.len() != expected {
        return Err(ParseError::InvalidRow {
            row: index,
            expected,
            found: values.len(),
        });
    }
    Ok(values)
}

/// Write `system` in the augmented layout. Values use the shortest
/// representation that parses back to the same `f64`.
#[must_use]
pub fn render_system(system: &LinearSystem) -> String {
    let mut out = format!("{}\n", system.dimension());
    for (row, rhs) in system.a.iter().zip(&system.b) {
        let line: Vec<String> = row.iter().chain(std::iter::once(rhs)).map(f64::to_string).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}
