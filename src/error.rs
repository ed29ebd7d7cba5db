//! Error types for the Hamiltonian path pipeline

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type for library operations
pub type HamResult<T> = Result<T, Error>;

/// Malformed instance input. Line numbers are 1-based and count every physical line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No significant (non-blank, non-comment) line at all
    #[error("instance is empty or contains only comments")]
    Empty,

    #[error("line {line}: header must have the form 'n m', found '{content}'")]
    BadHeader { line: usize, content: String },

    #[error("line {line}: '{token}' is not a non-negative integer")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: expected 'u v', found '{content}'")]
    MalformedEdge { line: usize, content: String },

    #[error("line {line}: vertices {u},{v} are outside the range 1..{n}")]
    VertexOutOfRange { line: usize, u: usize, v: usize, n: usize },

    /// Programmatic construction with an endpoint outside 1..=n
    #[error("edge #{index} ({u}, {v}) has an endpoint outside the range 1..{n}")]
    EdgeOutOfRange { index: usize, u: usize, v: usize, n: usize },

    #[error("instance declares no vertices")]
    NoVertices,

    #[error("instance declares {n} vertices, at most {max} are supported")]
    TooManyVertices { n: usize, max: usize },
}

/// Declared edge count differs from the number of parsed edge lines.
///
/// Never returned as an error; it travels alongside the parsed graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeCountMismatch {
    pub declared: usize,
    pub parsed: usize,
}

impl fmt::Display for EdgeCountMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "header says m={}, but found {} edges",
            self.declared, self.parsed
        )
    }
}

/// The solver could not produce a SAT/UNSAT verdict.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("solver executable not found: {0}")]
    NotFound(String),

    #[error("failed to launch solver {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("solver timed out after {0:?}")]
    Timeout(Duration),

    #[error("solver terminated abnormally ({status}): {stderr}")]
    Crashed { status: String, stderr: String },

    #[error("could not interpret solver output: {0}")]
    UnparseableOutput(String),

    /// The solver ran but reported neither SATISFIABLE nor UNSATISFIABLE
    #[error("solver gave no verdict: {0}")]
    Indeterminate(String),

    #[error("solver reported SATISFIABLE without a model")]
    MissingModel,

    /// The returned model falsifies a clause of the submitted formula
    #[error("solver model violates clause {clause_index} of the formula")]
    ModelViolatesFormula { clause_index: usize },

    #[error("solver I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The model does not describe a permutation of vertices over positions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodingError {
    #[error("position {position} is not occupied by any vertex")]
    UnfilledPosition { position: usize },

    #[error("position {position} is occupied by several vertices: {vertices:?}")]
    AmbiguousPosition { position: usize, vertices: Vec<usize> },

    #[error("vertex {vertex} occupies both position {first} and position {second}")]
    RepeatedVertex {
        vertex: usize,
        first: usize,
        second: usize,
    },

    /// The decoded permutation uses a transition the graph does not have
    #[error("decoded order is not a Hamiltonian path: {0}")]
    NotAPath(String),
}

/// Errors reading a DIMACS CNF document back into a formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimacsError {
    #[error("missing 'p cnf' problem line")]
    MissingHeader,

    #[error("line {line}: malformed problem line '{content}'")]
    BadHeader { line: usize, content: String },

    #[error("line {line}: '{token}' is not a literal")]
    BadLiteral { line: usize, token: String },

    #[error("header declares {declared} clauses, found {found}")]
    ClauseCountMismatch { declared: usize, found: usize },

    #[error("literal {literal} exceeds the declared {num_vars} variables")]
    VariableOutOfRange { literal: i32, num_vars: usize },

    #[error("last clause is not terminated by 0")]
    UnterminatedClause,
}

/// Top-level error for the pipeline
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid instance: {0}")]
    Validation(#[from] ValidationError),

    #[error("solver failure: {0}")]
    Solver(#[from] SolverError),

    #[error("cannot decode model: {0}")]
    Decoding(#[from] DecodingError),

    #[error("invalid DIMACS: {0}")]
    Dimacs(#[from] DimacsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_name_the_line() {
        let err = ValidationError::VertexOutOfRange { line: 7, u: 5, v: 1, n: 4 };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("1..4"));
    }

    #[test]
    fn test_solver_error_is_not_unsat() {
        let err: Error = SolverError::Timeout(Duration::from_secs(3)).into();
        assert!(matches!(err, Error::Solver(SolverError::Timeout(_))));
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_mismatch_display() {
        let warning = EdgeCountMismatch { declared: 4, parsed: 2 };
        assert_eq!(warning.to_string(), "header says m=4, but found 2 edges");
    }
}
