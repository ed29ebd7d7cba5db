//! Factory for creating SAT solver instances based on configuration

use super::cadical_solver::CadicalSolver;
use super::dimacs::Formula;
use super::external_solver::{ExternalSolver, ExternalSolverOptions};
use super::solver::{SolveOutcome, SolverRun};
use crate::config::{SolverBackend, SolverConfig};
use crate::error::SolverError;
use std::path::Path;
use tracing::info;

/// Unified SAT solver interface that can use different backends
#[derive(Debug, Clone)]
pub enum UnifiedSatSolver {
    External(ExternalSolver),
    Cadical(CadicalSolver),
}

impl UnifiedSatSolver {
    /// Create a new solver instance based on the specified backend
    pub fn new(backend: SolverBackend) -> Self {
        match backend {
            SolverBackend::External => {
                UnifiedSatSolver::External(ExternalSolver::new(ExternalSolverOptions::default()))
            }
            SolverBackend::Cadical => UnifiedSatSolver::Cadical(CadicalSolver::new()),
        }
    }

    /// Create a solver from the solver section of the settings
    pub fn from_config(config: &SolverConfig) -> Self {
        match config.backend {
            SolverBackend::External => UnifiedSatSolver::External(ExternalSolver::new(
                ExternalSolverOptions {
                    executable: config.executable.clone(),
                    model_flag: config.model_flag.clone(),
                    extra_args: config.extra_args.clone(),
                    timeout: config.timeout(),
                },
            )),
            SolverBackend::Cadical => UnifiedSatSolver::Cadical(CadicalSolver::new()),
        }
    }

    /// Get the backend type
    pub fn backend(&self) -> SolverBackend {
        match self {
            UnifiedSatSolver::External(_) => SolverBackend::External,
            UnifiedSatSolver::Cadical(_) => SolverBackend::Cadical,
        }
    }

    /// Solve the formula.
    ///
    /// When `cnf_path` is given it must hold the DIMACS rendering of `formula`; the external
    /// backend then reads it instead of writing a temporary copy. A returned model is checked
    /// against every clause before it is handed on.
    pub fn solve(&self, formula: &Formula, cnf_path: Option<&Path>) -> Result<SolverRun, SolverError> {
        info!(
            "Solving {} variables, {} clauses with {:?} backend",
            formula.num_vars,
            formula.clause_count(),
            self.backend()
        );

        let run = match self {
            UnifiedSatSolver::External(solver) => match cnf_path {
                Some(path) => solver.solve_file(path)?,
                None => solver.solve(formula)?,
            },
            UnifiedSatSolver::Cadical(solver) => solver.solve(formula)?,
        };

        if let SolveOutcome::Satisfiable(model) = &run.outcome {
            if let Some(clause_index) = formula.first_violated_clause(model) {
                return Err(SolverError::ModelViolatesFormula { clause_index });
            }
        }

        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::sat::constraints::Clause;
    use std::path::PathBuf;

    #[test]
    fn test_solver_creation() {
        assert_eq!(UnifiedSatSolver::new(SolverBackend::Cadical).backend(), SolverBackend::Cadical);
        assert_eq!(UnifiedSatSolver::new(SolverBackend::External).backend(), SolverBackend::External);
    }

    #[test]
    fn test_from_config_carries_options() {
        let mut settings = Settings::default();
        settings.solver.executable = Some(PathBuf::from("/opt/glucose"));
        settings.solver.extra_args = vec!["-verb=0".to_string()];
        settings.solver.timeout_seconds = Some(5);

        let UnifiedSatSolver::External(solver) = UnifiedSatSolver::from_config(&settings.solver) else {
            panic!("expected external backend");
        };
        let options = solver.options();
        assert_eq!(options.executable, Some(PathBuf::from("/opt/glucose")));
        assert_eq!(options.extra_args, vec!["-verb=0".to_string()]);
        assert_eq!(options.timeout, Some(std::time::Duration::from_secs(5)));
    }

    #[test]
    fn test_cadical_backend_solves() {
        let solver = UnifiedSatSolver::new(SolverBackend::Cadical);
        let formula = Formula::new(2, vec![Clause::binary(1, 2), Clause::new(vec![-1])]);

        let run = solver.solve(&formula, None).unwrap();
        assert!(run.outcome.is_satisfiable());
    }
}
