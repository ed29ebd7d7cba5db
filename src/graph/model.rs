//! Graph representation for Hamiltonian path instances

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Largest vertex count whose n² variables still fit a positive `i32` literal
pub const MAX_VERTICES: usize = 46_340;

/// An edge between two 1-based vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

impl Edge {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Canonical form under the given directedness.
    ///
    /// Undirected edges are normalized to (min, max); directed edges are kept as-is.
    pub fn canonical(self, directed: bool) -> Self {
        if directed || self.from <= self.to {
            self
        } else {
            Self { from: self.to, to: self.from }
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.from, self.to)
    }
}

/// Immutable graph instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGraph")]
pub struct Graph {
    n: usize,
    directed: bool,
    /// Edges in input order, duplicates included
    edges: Vec<Edge>,
}

/// Unchecked wire form of [`Graph`]
#[derive(Deserialize)]
struct RawGraph {
    n: usize,
    directed: bool,
    edges: Vec<Edge>,
}

impl TryFrom<RawGraph> for Graph {
    type Error = ValidationError;

    fn try_from(raw: RawGraph) -> Result<Self, Self::Error> {
        let edges = raw.edges.into_iter().map(|edge| (edge.from, edge.to)).collect();
        Graph::new(raw.n, edges, raw.directed)
    }
}

impl Graph {
    /// Build a graph, checking that every endpoint lies in 1..=n
    pub fn new(n: usize, edges: Vec<(usize, usize)>, directed: bool) -> Result<Self, ValidationError> {
        Self::check_vertex_count(n)?;

        for (index, &(u, v)) in edges.iter().enumerate() {
            if !(1..=n).contains(&u) || !(1..=n).contains(&v) {
                return Err(ValidationError::EdgeOutOfRange { index, u, v, n });
            }
        }

        Ok(Self {
            n,
            directed,
            edges: edges.into_iter().map(|(u, v)| Edge::new(u, v)).collect(),
        })
    }

    /// Complete undirected graph K_n
    pub fn complete(n: usize) -> Result<Self, ValidationError> {
        let edges = (1..=n)
            .flat_map(|u| (u + 1..=n).map(move |v| (u, v)))
            .collect();
        Self::new(n, edges, false)
    }

    pub(crate) fn check_vertex_count(n: usize) -> Result<(), ValidationError> {
        if n == 0 {
            return Err(ValidationError::NoVertices);
        }
        if n > MAX_VERTICES {
            return Err(ValidationError::TooManyVertices { n, max: MAX_VERTICES });
        }
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.n
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Edges exactly as read
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Deduplicated canonical edges, in sorted order
    pub fn edge_set(&self) -> BTreeSet<Edge> {
        self.edges
            .iter()
            .map(|edge| edge.canonical(self.directed))
            .collect()
    }

    /// Whether moving from `u` to `v` is supported by an edge
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        let wanted = Edge::new(u, v).canonical(self.directed);
        self.edges
            .iter()
            .any(|edge| edge.canonical(self.directed) == wanted)
    }

    /// Vertices with no incident edge other than self-loops
    pub fn isolated_vertices(&self) -> Vec<usize> {
        let mut touched = vec![false; self.n + 1];
        for edge in self.edges.iter().filter(|e| !e.is_self_loop()) {
            touched[edge.from] = true;
            touched[edge.to] = true;
        }
        (1..=self.n).filter(|&v| !touched[v]).collect()
    }

    /// Number of distinct ordered transitions u -> v (u != v) the edges allow
    pub fn allowed_transition_count(&self) -> usize {
        let proper = self
            .edge_set()
            .into_iter()
            .filter(|edge| !edge.is_self_loop())
            .count();
        if self.directed {
            proper
        } else {
            proper * 2
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} graph: {} vertices, {} edges ({} distinct)",
            if self.directed { "Directed" } else { "Undirected" },
            self.n,
            self.edges.len(),
            self.edge_set().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undirected_edge_set_dedups_orientations() {
        let graph = Graph::new(3, vec![(2, 1), (1, 2), (1, 2), (3, 2)], false).unwrap();

        let set: Vec<Edge> = graph.edge_set().into_iter().collect();
        assert_eq!(set, vec![Edge::new(1, 2), Edge::new(2, 3)]);
        assert_eq!(graph.edges().len(), 4);
    }

    #[test]
    fn test_directed_edge_set_keeps_direction() {
        let graph = Graph::new(3, vec![(2, 1), (1, 2), (2, 1)], true).unwrap();

        let set: Vec<Edge> = graph.edge_set().into_iter().collect();
        assert_eq!(set, vec![Edge::new(1, 2), Edge::new(2, 1)]);
    }

    #[test]
    fn test_has_edge() {
        let undirected = Graph::new(3, vec![(3, 1)], false).unwrap();
        assert!(undirected.has_edge(1, 3));
        assert!(undirected.has_edge(3, 1));
        assert!(!undirected.has_edge(1, 2));

        let directed = Graph::new(3, vec![(3, 1)], true).unwrap();
        assert!(directed.has_edge(3, 1));
        assert!(!directed.has_edge(1, 3));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = Graph::new(3, vec![(1, 2), (0, 3)], false).unwrap_err();
        assert_eq!(err, ValidationError::EdgeOutOfRange { index: 1, u: 0, v: 3, n: 3 });

        assert!(Graph::new(3, vec![(4, 1)], true).is_err());
        assert_eq!(Graph::new(0, vec![], false).unwrap_err(), ValidationError::NoVertices);
    }

    #[test]
    fn test_deserialize_checks_ranges() {
        let bad_edge = r#"{"n":2,"directed":false,"edges":[{"from":5,"to":1}]}"#;
        let err = serde_json::from_str::<Graph>(bad_edge).unwrap_err();
        assert!(err.to_string().contains("outside the range 1..2"), "{}", err);

        let no_vertices = r#"{"n":0,"directed":false,"edges":[]}"#;
        assert!(serde_json::from_str::<Graph>(no_vertices).is_err());

        let graph = Graph::new(3, vec![(1, 2), (3, 2)], true).unwrap();
        let json = serde_json::to_string(&graph).unwrap();
        assert_eq!(serde_json::from_str::<Graph>(&json).unwrap(), graph);
    }

    #[test]
    fn test_complete_graph() {
        let k4 = Graph::complete(4).unwrap();
        assert_eq!(k4.edge_set().len(), 6);
        assert_eq!(k4.allowed_transition_count(), 12);
        assert!(k4.isolated_vertices().is_empty());
    }

    #[test]
    fn test_isolated_vertices_ignore_self_loops() {
        let graph = Graph::new(4, vec![(1, 2), (3, 3)], false).unwrap();
        assert_eq!(graph.isolated_vertices(), vec![3, 4]);
        assert_eq!(graph.allowed_transition_count(), 2);
    }
}
