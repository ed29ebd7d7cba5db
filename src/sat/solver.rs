//! Solver verdicts and parsing of competition-style solver output

use super::Model;
use crate::error::SolverError;
use std::time::Duration;

/// Verdict of a solver that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Satisfiable(Model),
    Unsatisfiable,
}

impl SolveOutcome {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SolveOutcome::Satisfiable(_))
    }
}

/// Result of one solver invocation
#[derive(Debug, Clone)]
pub struct SolverRun {
    pub outcome: SolveOutcome,
    pub solve_time: Duration,
    /// Raw solver output, when the backend produces any
    pub raw_output: Option<String>,
}

/// Interpret solver output.
///
/// A line `s SATISFIABLE` / `s UNSATISFIABLE` carries the verdict; the model is read from
/// every `v ` line up to the terminating `0`, so it may be split across several lines.
pub fn parse_solver_output(output: &str) -> Result<SolveOutcome, SolverError> {
    let mut status: Option<&str> = None;
    let mut literals = Vec::new();
    let mut terminated = false;
    let mut saw_model = false;

    for line in output.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("s ") {
            if status.is_none() {
                status = Some(rest.trim());
            }
        } else if let Some(rest) = line.strip_prefix("v ") {
            saw_model = true;
            if terminated {
                continue;
            }
            for token in rest.split_whitespace() {
                let literal: i32 = token.parse().map_err(|_| {
                    SolverError::UnparseableOutput(format!("bad literal '{}' in model line", token))
                })?;
                if literal == 0 {
                    terminated = true;
                    break;
                }
                literals.push(literal);
            }
        }
    }

    match status {
        Some("SATISFIABLE") => {
            if !saw_model {
                return Err(SolverError::MissingModel);
            }
            Ok(SolveOutcome::Satisfiable(Model::from_literals(literals)))
        }
        Some("UNSATISFIABLE") => Ok(SolveOutcome::Unsatisfiable),
        Some(other) => Err(SolverError::Indeterminate(other.to_string())),
        None => Err(SolverError::UnparseableOutput(
            "no 's' status line in solver output".to_string(),
        )),
    }
}

impl std::fmt::Display for SolverRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solver Run:")?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        match &self.outcome {
            SolveOutcome::Satisfiable(model) => {
                writeln!(f, "  Result: SATISFIABLE")?;
                writeln!(f, "  True variables: {}", model.len())?;
            }
            SolveOutcome::Unsatisfiable => writeln!(f, "  Result: UNSATISFIABLE")?,
        }
        Ok(())
    }
}
