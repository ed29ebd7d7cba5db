//! In-process SAT solving using CaDiCaL

use super::dimacs::Formula;
use super::solver::{SolveOutcome, SolverRun};
use super::Model;
use crate::error::SolverError;
use cadical::Solver;
use std::time::Instant;
use tracing::debug;

/// Solves a formula with an embedded CaDiCaL instance
#[derive(Debug, Clone, Copy, Default)]
pub struct CadicalSolver;

impl CadicalSolver {
    pub fn new() -> Self {
        Self
    }

    /// Solve the formula; a fresh CaDiCaL instance is used for every call
    pub fn solve(&self, formula: &Formula) -> Result<SolverRun, SolverError> {
        let mut solver: Solver = Solver::new();
        for clause in &formula.clauses {
            solver.add_clause(clause.literals.iter().copied());
        }

        let start_time = Instant::now();
        let result = solver.solve();
        let solve_time = start_time.elapsed();
        debug!("CaDiCaL returned {:?} after {:.3}s", result, solve_time.as_secs_f64());

        let outcome = match result {
            Some(true) => SolveOutcome::Satisfiable(Self::extract_model(&solver, formula.num_vars)),
            Some(false) => SolveOutcome::Unsatisfiable,
            None => {
                return Err(SolverError::Indeterminate(
                    "CaDiCaL stopped without a verdict".to_string(),
                ))
            }
        };

        Ok(SolverRun {
            outcome,
            solve_time,
            raw_output: None,
        })
    }

    /// Extract variable assignment from the solver
    fn extract_model(solver: &Solver, num_vars: usize) -> Model {
        Model::from_true_variables(
            (1..=num_vars as i32).filter(|&var| solver.value(var) == Some(true)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::constraints::Clause;

    #[test]
    fn test_simple_satisfiable() {
        // (x1 ∨ x2) ∧ (¬x1 ∨ x2)
        let formula = Formula::new(2, vec![Clause::new(vec![1, 2]), Clause::new(vec![-1, 2])]);

        let run = CadicalSolver::new().solve(&formula).unwrap();
        let SolveOutcome::Satisfiable(model) = run.outcome else {
            panic!("expected SAT");
        };
        assert!(model.is_true(2));
        assert!(formula.is_satisfied_by(&model));
        assert!(run.raw_output.is_none());
    }

    #[test]
    fn test_unsatisfiable() {
        let formula = Formula::new(1, vec![Clause::new(vec![1]), Clause::new(vec![-1])]);
        let run = CadicalSolver::new().solve(&formula).unwrap();
        assert_eq!(run.outcome, SolveOutcome::Unsatisfiable);
    }
}
