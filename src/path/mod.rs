//! Hamiltonian path problem definition, decoding and validation

pub mod decoder;
pub mod problem;
pub mod solution;
pub mod validator;

pub use decoder::{decode_path, path_to_model};
pub use problem::{find_hamiltonian_path, HamiltonianProblem, SolvabilityEstimate};
pub use solution::{HamiltonianPath, PathOutcome, SolveReport};
pub use validator::{PathValidator, ValidationResult};
