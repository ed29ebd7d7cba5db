//! Hamiltonian Path SAT Solver
//!
//! Reduces the Hamiltonian path problem on a graph to CNF with the permutation-matrix encoding,
//! hands the formula to a SAT solver and decodes the model back into a vertex ordering.

pub mod config;
pub mod error;
pub mod graph;
pub mod path;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use error::{Error, HamResult};
pub use graph::Graph;
pub use path::{find_hamiltonian_path, HamiltonianPath, HamiltonianProblem, PathOutcome, SolveReport};

use anyhow::Result;

/// Main entry point: load the configured instance and solve it
pub fn solve_instance(settings: Settings) -> Result<SolveReport> {
    let problem = HamiltonianProblem::new(settings)?;
    problem.solve()
}
