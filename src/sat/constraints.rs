//! Constraint generation for the Hamiltonian path SAT encoding

use super::variables::{varnum, VariableEncoding};
use super::Model;
use crate::graph::{Edge, Graph};
use itertools::Itertools;
use std::collections::BTreeSet;
use tracing::debug;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self { literals: vec![lit1, lit2] }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Whether at least one literal holds under the model
    pub fn is_satisfied_by(&self, model: &Model) -> bool {
        self.literals
            .iter()
            .any(|&lit| model.is_true(lit.abs()) == (lit > 0))
    }
}

/// The five clause families of the permutation-matrix encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintFamily {
    /// Every position holds some vertex
    PositionCoverage,
    /// No position holds two vertices
    PositionUniqueness,
    /// Every vertex sits at some position
    VertexCoverage,
    /// No vertex sits at two positions
    VertexUniqueness,
    /// Consecutive positions must be joined by an edge
    Adjacency,
}

impl ConstraintFamily {
    /// Families in emission order
    pub const ALL: [ConstraintFamily; 5] = [
        ConstraintFamily::PositionCoverage,
        ConstraintFamily::PositionUniqueness,
        ConstraintFamily::VertexCoverage,
        ConstraintFamily::VertexUniqueness,
        ConstraintFamily::Adjacency,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConstraintFamily::PositionCoverage => "position coverage",
            ConstraintFamily::PositionUniqueness => "position uniqueness",
            ConstraintFamily::VertexCoverage => "vertex coverage",
            ConstraintFamily::VertexUniqueness => "vertex uniqueness",
            ConstraintFamily::Adjacency => "adjacency",
        }
    }
}

/// Generates SAT constraints for the Hamiltonian path problem on one graph
pub struct ConstraintGenerator<'g> {
    graph: &'g Graph,
    encoding: VariableEncoding,
    edge_set: BTreeSet<Edge>,
}

impl<'g> ConstraintGenerator<'g> {
    /// Create a new constraint generator
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            encoding: VariableEncoding::new(graph.vertex_count()),
            edge_set: graph.edge_set(),
        }
    }

    /// Generate all constraints, family by family in [`ConstraintFamily::ALL`] order
    pub fn generate_all_constraints(&self) -> Vec<Clause> {
        let mut clauses = Vec::new();

        for family in ConstraintFamily::ALL {
            let family_clauses = self.generate_family(family);
            debug!("{}: {} clauses", family.name(), family_clauses.len());
            clauses.extend(family_clauses);
        }

        debug_assert!(clauses.iter().all(|c| !c.is_empty()));
        clauses
    }

    /// Generate the clauses of a single family
    pub fn generate_family(&self, family: ConstraintFamily) -> Vec<Clause> {
        match family {
            ConstraintFamily::PositionCoverage => self.generate_position_coverage(),
            ConstraintFamily::PositionUniqueness => self.generate_position_uniqueness(),
            ConstraintFamily::VertexCoverage => self.generate_vertex_coverage(),
            ConstraintFamily::VertexUniqueness => self.generate_vertex_uniqueness(),
            ConstraintFamily::Adjacency => self.generate_adjacency_constraints(),
        }
    }

    fn n(&self) -> usize {
        self.encoding.vertex_count()
    }

    fn generate_position_coverage(&self) -> Vec<Clause> {
        (1..=self.n())
            .map(|i| Clause::new(self.encoding.variables_at_position(i)))
            .collect()
    }

    fn generate_position_uniqueness(&self) -> Vec<Clause> {
        let n = self.n();
        let mut clauses = Vec::new();

        for i in 1..=n {
            for (v, w) in (1..=n).tuple_combinations() {
                clauses.push(Clause::binary(-varnum(v, i, n), -varnum(w, i, n)));
            }
        }

        clauses
    }

    fn generate_vertex_coverage(&self) -> Vec<Clause> {
        (1..=self.n())
            .map(|v| Clause::new(self.encoding.variables_of_vertex(v)))
            .collect()
    }

    fn generate_vertex_uniqueness(&self) -> Vec<Clause> {
        let n = self.n();
        let mut clauses = Vec::new();

        for v in 1..=n {
            for (i, j) in (1..=n).tuple_combinations() {
                clauses.push(Clause::binary(-varnum(v, i, n), -varnum(v, j, n)));
            }
        }

        clauses
    }

    /// Forbid `u` at position i followed by `v` at i+1 whenever no edge allows u -> v
    fn generate_adjacency_constraints(&self) -> Vec<Clause> {
        let n = self.n();
        let forbidden: Vec<(usize, usize)> = (1..=n)
            .cartesian_product(1..=n)
            .filter(|&(u, v)| u != v && !self.transition_allowed(u, v))
            .collect();

        let mut clauses = Vec::with_capacity(forbidden.len() * n.saturating_sub(1));
        for i in 1..n {
            for &(u, v) in &forbidden {
                clauses.push(Clause::binary(-varnum(u, i, n), -varnum(v, i + 1, n)));
            }
        }

        clauses
    }

    fn transition_allowed(&self, u: usize, v: usize) -> bool {
        self.edge_set
            .contains(&Edge::new(u, v).canonical(self.graph.is_directed()))
    }

    /// Get the variable encoding
    pub fn encoding(&self) -> &VariableEncoding {
        &self.encoding
    }

    /// Closed-form clause counts per family, without generating anything
    pub fn statistics(&self) -> ConstraintStatistics {
        let n = self.n();
        let pairs = n * n.saturating_sub(1) / 2;
        let forbidden = n * n.saturating_sub(1) - self.graph.allowed_transition_count();

        ConstraintStatistics {
            vertices: n,
            total_variables: self.encoding.variable_count(),
            position_coverage: n,
            position_uniqueness: n * pairs,
            vertex_coverage: n,
            vertex_uniqueness: n * pairs,
            adjacency: n.saturating_sub(1) * forbidden,
        }
    }
}

/// Statistics about constraint generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintStatistics {
    pub vertices: usize,
    pub total_variables: usize,
    pub position_coverage: usize,
    pub position_uniqueness: usize,
    pub vertex_coverage: usize,
    pub vertex_uniqueness: usize,
    pub adjacency: usize,
}

impl ConstraintStatistics {
    pub fn count(&self, family: ConstraintFamily) -> usize {
        match family {
            ConstraintFamily::PositionCoverage => self.position_coverage,
            ConstraintFamily::PositionUniqueness => self.position_uniqueness,
            ConstraintFamily::VertexCoverage => self.vertex_coverage,
            ConstraintFamily::VertexUniqueness => self.vertex_uniqueness,
            ConstraintFamily::Adjacency => self.adjacency,
        }
    }

    pub fn total_clauses(&self) -> usize {
        ConstraintFamily::ALL.iter().map(|&f| self.count(f)).sum()
    }
}

impl std::fmt::Display for ConstraintStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Constraint Generation Statistics:")?;
        writeln!(f, "  Vertices: {}", self.vertices)?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        for family in ConstraintFamily::ALL {
            writeln!(f, "  {:<20} {}", format!("{}:", family.name()), self.count(family))?;
        }
        writeln!(f, "  Total clauses: {}", self.total_clauses())?;
        Ok(())
    }
}
