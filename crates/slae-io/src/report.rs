#![forbid(unsafe_code)]

//! Plain-text rendering of a solve result.

use std::fmt;

use slae_core::{IterationInfo, SolveResult};

const NO_DIFF: &str = "—";

/// Plain-text view of a [`SolveResult`].
#[derive(Debug, Clone, Copy)]
pub struct Report<'a>(pub &'a SolveResult);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(f, "Method: {}", result.method)?;
        writeln!(f, "Solution X:")?;
        for (idx, value) in result.solution.iter().enumerate() {
            writeln!(f, "  x{} = {value}", idx + 1)?;
        }
        if result.is_valid {
            writeln!(f, "Solution is valid: AX ≈ B")?;
        } else {
            writeln!(f, "Solution failed verification")?;
        }
        writeln!(f, "Residual norm: {:.3e}", result.residual_norm)?;

        if !result.warnings.is_empty() {
            writeln!(f, "Warnings:")?;
            for warning in &result.warnings {
                writeln!(f, "  - {warning}")?;
            }
        }

        if let Some(iterations) = result.iterations.as_deref() {
            write_iteration_table(f, iterations)?;
        }
        Ok(())
    }
}

fn format_vector(vector: &[f64]) -> String {
    vector
        .iter()
        .map(|value| format!("{value:.6}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_iteration_table(f: &mut fmt::Formatter<'_>, iterations: &[IterationInfo]) -> fmt::Result {
    writeln!(f, "Iterations: {}", iterations.len())?;
    let rows: Vec<(usize, String, String)> = iterations
        .iter()
        .enumerate()
        .map(|(idx, info)| {
            let previous = idx.checked_sub(1).map(|p| &iterations[p]);
            let diff = info
                .diff_from(previous)
                .map_or_else(|| NO_DIFF.to_string(), |d| format!("{d:.3e}"));
            (info.iteration, format_vector(&info.vector), diff)
        })
        .collect();
    let width = rows
        .iter()
        .map(|(_, vector, _)| vector.chars().count())
        .max()
        .unwrap_or(0)
        .max("Vector".len());

    writeln!(f, "{:>5}  {:<width$}  Diff Norm", "#", "Vector")?;
    for (iteration, vector, diff) in rows {
        writeln!(f, "{iteration:>5}  {vector:<width$}  {diff}")?;
    }
    Ok(())
}

/// Render `result` as the multi-line text report printed by the CLI.
#[must_use]
pub fn render_report(result: &SolveResult) -> String {
    Report(result).to_string()
}
