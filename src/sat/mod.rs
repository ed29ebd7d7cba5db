//! SAT encoding and solving components for Hamiltonian paths

pub mod variables;
pub mod constraints;
pub mod model;
pub mod dimacs;
pub mod encoder;
pub mod solver;
pub mod external_solver;
pub mod cadical_solver;
pub mod solver_factory;

pub use variables::{varnum, VariableEncoding, VariableType};
pub use constraints::{Clause, ConstraintFamily, ConstraintGenerator};
pub use model::Model;
pub use dimacs::{parse_dimacs, Formula};
pub use encoder::SatEncoder;
pub use solver::{parse_solver_output, SolveOutcome, SolverRun};
pub use external_solver::{ExternalSolver, ExternalSolverOptions};
pub use cadical_solver::CadicalSolver;
pub use solver_factory::UnifiedSatSolver;
