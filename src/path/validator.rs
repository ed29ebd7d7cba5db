//! Independent check that a vertex order is a Hamiltonian path of a graph

use crate::graph::Graph;
use std::fmt;

/// Validates candidate paths against a graph without going through the SAT encoding
pub struct PathValidator<'g> {
    graph: &'g Graph,
}

/// Result of path validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error_message: Option<String>,
    pub violations: Vec<PathViolation>,
    pub transitions_checked: usize,
}

/// One reason a vertex order is not a Hamiltonian path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathViolation {
    WrongLength { expected: usize, actual: usize },
    VertexOutOfRange { position: usize, vertex: usize },
    RepeatedVertex { vertex: usize, first: usize, second: usize },
    MissingVertex { vertex: usize },
    /// Consecutive vertices at `position` and `position + 1` are not joined by an edge
    MissingEdge { position: usize, from: usize, to: usize },
}

impl fmt::Display for PathViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathViolation::WrongLength { expected, actual } => {
                write!(f, "path visits {} vertices, expected {}", actual, expected)
            }
            PathViolation::VertexOutOfRange { position, vertex } => {
                write!(f, "position {}: vertex {} does not exist", position, vertex)
            }
            PathViolation::RepeatedVertex { vertex, first, second } => {
                write!(f, "vertex {} appears at positions {} and {}", vertex, first, second)
            }
            PathViolation::MissingVertex { vertex } => write!(f, "vertex {} is never visited", vertex),
            PathViolation::MissingEdge { position, from, to } => {
                write!(f, "positions {}-{}: no edge {} -> {}", position, position + 1, from, to)
            }
        }
    }
}

impl<'g> PathValidator<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Check that `path` visits every vertex exactly once along existing edges
    pub fn validate(&self, path: &[usize]) -> ValidationResult {
        let n = self.graph.vertex_count();
        let mut violations = Vec::new();

        if path.len() != n {
            violations.push(PathViolation::WrongLength {
                expected: n,
                actual: path.len(),
            });
        }

        let mut first_seen = vec![0usize; n + 1];
        for (idx, &vertex) in path.iter().enumerate() {
            let position = idx + 1;
            if vertex == 0 || vertex > n {
                violations.push(PathViolation::VertexOutOfRange { position, vertex });
                continue;
            }
            match first_seen[vertex] {
                0 => first_seen[vertex] = position,
                first => violations.push(PathViolation::RepeatedVertex {
                    vertex,
                    first,
                    second: position,
                }),
            }
        }
        violations.extend(
            (1..=n)
                .filter(|&v| first_seen[v] == 0)
                .map(|vertex| PathViolation::MissingVertex { vertex }),
        );

        let mut transitions_checked = 0;
        for (idx, pair) in path.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            transitions_checked += 1;
            if !self.graph.has_edge(from, to) {
                violations.push(PathViolation::MissingEdge {
                    position: idx + 1,
                    from,
                    to,
                });
            }
        }

        let error_message = violations.first().map(|first| {
            if violations.len() == 1 {
                first.to_string()
            } else {
                format!("{} (and {} more)", first, violations.len() - 1)
            }
        });

        ValidationResult {
            is_valid: violations.is_empty(),
            error_message,
            violations,
            transitions_checked,
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            writeln!(f, "Valid Hamiltonian path ({} transitions checked)", self.transitions_checked)
        } else {
            writeln!(f, "Invalid path ({} violations):", self.violations.len())?;
            for violation in &self.violations {
                writeln!(f, "  - {}", violation)?;
            }
            Ok(())
        }
    }
}
