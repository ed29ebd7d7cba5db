//! SAT encoder: Hamiltonian path instance to CNF formula

use super::constraints::{ConstraintGenerator, ConstraintStatistics};
use super::dimacs::Formula;
use crate::graph::Graph;
use tracing::info;

/// Builds the permutation-matrix formula for one graph
pub struct SatEncoder<'g> {
    graph: &'g Graph,
    constraint_generator: ConstraintGenerator<'g>,
}

impl<'g> SatEncoder<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            constraint_generator: ConstraintGenerator::new(graph),
        }
    }

    /// Encode the graph. Satisfiable exactly when the graph has a Hamiltonian path.
    pub fn encode(&self) -> Formula {
        let clauses = self.constraint_generator.generate_all_constraints();
        let num_vars = self.constraint_generator.encoding().variable_count();

        info!("Generated {} clauses with {} variables", clauses.len(), num_vars);
        Formula::new(num_vars, clauses)
    }

    /// Get encoding statistics
    pub fn statistics(&self) -> EncodingStatistics {
        EncodingStatistics {
            vertices: self.graph.vertex_count(),
            edges: self.graph.edges().len(),
            distinct_edges: self.graph.edge_set().len(),
            directed: self.graph.is_directed(),
            constraints: self.constraint_generator.statistics(),
        }
    }

    /// Rough size estimate of the formula before generating it
    pub fn estimate_complexity(&self) -> ComplexityEstimate {
        let stats = self.constraint_generator.statistics();
        let estimated_clauses = stats.total_clauses();

        let complexity_level = if estimated_clauses < 10_000 {
            ComplexityLevel::Low
        } else if estimated_clauses < 1_000_000 {
            ComplexityLevel::Medium
        } else if estimated_clauses < 50_000_000 {
            ComplexityLevel::High
        } else {
            ComplexityLevel::VeryHigh
        };

        let n = self.graph.vertex_count();
        let possible_transitions = n * n.saturating_sub(1);
        let edge_density = if possible_transitions == 0 {
            1.0
        } else {
            self.graph.allowed_transition_count() as f64 / possible_transitions as f64
        };

        ComplexityEstimate {
            complexity_level,
            estimated_variables: stats.total_variables,
            estimated_clauses,
            edge_density,
            isolated_vertices: if n > 1 { self.graph.isolated_vertices().len() } else { 0 },
        }
    }
}

/// Statistics about the SAT encoding
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub vertices: usize,
    pub edges: usize,
    pub distinct_edges: usize,
    pub directed: bool,
    pub constraints: ConstraintStatistics,
}

impl EncodingStatistics {
    pub fn total_variables(&self) -> usize {
        self.constraints.total_variables
    }

    pub fn total_clauses(&self) -> usize {
        self.constraints.total_clauses()
    }
}

/// Complexity estimate for the problem
#[derive(Debug, Clone)]
pub struct ComplexityEstimate {
    pub complexity_level: ComplexityLevel,
    pub estimated_variables: usize,
    pub estimated_clauses: usize,
    /// Share of ordered vertex pairs joined by an edge
    pub edge_density: f64,
    pub isolated_vertices: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Encoding Statistics:")?;
        writeln!(f, "  Vertices: {}", self.vertices)?;
        writeln!(f, "  Edges: {} ({} distinct)", self.edges, self.distinct_edges)?;
        writeln!(f, "  Directed: {}", self.directed)?;
        write!(f, "{}", self.constraints)?;
        Ok(())
    }
}

impl std::fmt::Display for ComplexityEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Problem Complexity Estimate:")?;
        writeln!(f, "  Complexity level: {:?}", self.complexity_level)?;
        writeln!(f, "  Estimated variables: {}", self.estimated_variables)?;
        writeln!(f, "  Estimated clauses: {}", self.estimated_clauses)?;
        writeln!(f, "  Edge density: {:.2}%", self.edge_density * 100.0)?;
        if self.isolated_vertices > 0 {
            writeln!(f, "  Isolated vertices: {} (no Hamiltonian path possible)", self.isolated_vertices)?;
        }

        let recommendation = match self.complexity_level {
            ComplexityLevel::Low => "Should solve quickly",
            ComplexityLevel::Medium => "May take some time to solve",
            ComplexityLevel::High => "Large formula, expect long solve times",
            ComplexityLevel::VeryHigh => "Formula may not fit in memory",
        };
        writeln!(f, "  Recommendation: {}", recommendation)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_declares_n_squared_variables() {
        let graph = Graph::new(4, vec![(1, 2), (2, 3), (3, 4), (4, 1)], false).unwrap();
        let encoder = SatEncoder::new(&graph);
        let formula = encoder.encode();

        assert_eq!(formula.num_vars, 16);
        assert_eq!(formula.clause_count(), encoder.statistics().total_clauses());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let graph = Graph::new(5, vec![(1, 2), (2, 5), (5, 3)], true).unwrap();
        let first = SatEncoder::new(&graph).encode().to_dimacs();
        let second = SatEncoder::new(&graph).encode().to_dimacs();
        assert_eq!(first, second);
    }

    #[test]
    fn test_complexity_estimation() {
        let graph = Graph::new(3, vec![(1, 2)], false).unwrap();
        let estimate = SatEncoder::new(&graph).estimate_complexity();

        assert_eq!(estimate.complexity_level, ComplexityLevel::Low);
        assert_eq!(estimate.estimated_variables, 9);
        assert_eq!(estimate.isolated_vertices, 1);
        assert!((estimate.edge_density - 2.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_vertex_estimate() {
        let graph = Graph::new(1, vec![], false).unwrap();
        let estimate = SatEncoder::new(&graph).estimate_complexity();
        assert_eq!(estimate.isolated_vertices, 0);
        assert_eq!(estimate.edge_density, 1.0);
    }
}
