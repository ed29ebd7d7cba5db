//! Reading and writing graph instance files
//!
//! Format: blank lines and lines starting with `#` are ignored. The first significant line is
//! `n m` (vertex count, declared edge count); every following significant line is an edge `u v`.

use super::Graph;
use crate::error::{EdgeCountMismatch, ValidationError};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};

/// A parsed instance together with what its header declared
#[derive(Debug, Clone)]
pub struct Instance {
    pub graph: Graph,
    pub declared_edges: usize,
}

impl Instance {
    /// Non-fatal header/body disagreement, if any
    pub fn edge_count_mismatch(&self) -> Option<EdgeCountMismatch> {
        let parsed = self.graph.edges().len();
        (parsed != self.declared_edges).then_some(EdgeCountMismatch {
            declared: self.declared_edges,
            parsed,
        })
    }
}

/// Load an instance from a text file
pub fn load_instance<P: AsRef<Path>>(path: P, directed: bool) -> Result<Instance> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read instance file: {}", path.as_ref().display()))?;

    parse_instance(&content, directed)
        .with_context(|| format!("Failed to parse instance file: {}", path.as_ref().display()))
}

/// Parse an instance from its textual form
pub fn parse_instance(content: &str, directed: bool) -> Result<Instance, ValidationError> {
    let mut significant = content
        .lines()
        .enumerate()
        .map(|(idx, raw)| (idx + 1, raw.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let (header_line, header) = significant.next().ok_or(ValidationError::Empty)?;
    let (n, declared_edges) = match header.split_whitespace().collect::<Vec<_>>()[..] {
        [n, m] => (
            parse_number(n, header_line)?,
            parse_number(m, header_line)?,
        ),
        _ => {
            return Err(ValidationError::BadHeader {
                line: header_line,
                content: header.to_string(),
            })
        }
    };
    Graph::check_vertex_count(n)?;

    let mut edges = Vec::with_capacity(declared_edges.min(1 << 16));
    for (line_no, line) in significant {
        let (u, v) = match line.split_whitespace().collect::<Vec<_>>()[..] {
            [u, v] => (parse_number(u, line_no)?, parse_number(v, line_no)?),
            _ => {
                return Err(ValidationError::MalformedEdge {
                    line: line_no,
                    content: line.to_string(),
                })
            }
        };

        if !(1..=n).contains(&u) || !(1..=n).contains(&v) {
            return Err(ValidationError::VertexOutOfRange { line: line_no, u, v, n });
        }
        edges.push((u, v));
    }

    let instance = Instance {
        graph: Graph::new(n, edges, directed)?,
        declared_edges,
    };

    if let Some(mismatch) = instance.edge_count_mismatch() {
        warn!("{}", mismatch);
    }
    debug!(
        "Parsed instance: n={}, {} edges, directed={}",
        n,
        instance.graph.edges().len(),
        directed
    );

    Ok(instance)
}

fn parse_number(token: &str, line: usize) -> Result<usize, ValidationError> {
    token.parse().map_err(|_| ValidationError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

/// Render a graph in the instance format, headed by a summary comment
pub fn instance_to_string(graph: &Graph) -> String {
    let mut result = format!("# {}", graph);
    result.push_str(&format!("{} {}\n", graph.vertex_count(), graph.edges().len()));
    for edge in graph.edges() {
        result.push_str(&format!("{} {}\n", edge.from, edge.to));
    }
    result
}

/// Save a graph to an instance file
pub fn save_instance<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, instance_to_string(graph))
        .with_context(|| format!("Failed to write instance to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Create example instance files
pub fn create_example_instances<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();

    let examples = [
        // 4-cycle: has a Hamiltonian path
        ("cycle4.txt", Graph::new(4, vec![(1, 2), (2, 3), (3, 4), (4, 1)], false)?),
        // Star with three leaves: no Hamiltonian path
        ("star4.txt", Graph::new(4, vec![(1, 2), (1, 3), (1, 4)], false)?),
        // Petersen graph: Hamiltonian path but no Hamiltonian cycle
        (
            "petersen.txt",
            Graph::new(
                10,
                vec![
                    (1, 2), (2, 3), (3, 4), (4, 5), (5, 1),
                    (1, 6), (2, 7), (3, 8), (4, 9), (5, 10),
                    (6, 8), (8, 10), (10, 7), (7, 9), (9, 6),
                ],
                false,
            )?,
        ),
        // Directed chain 3 -> 1 -> 4 -> 2; meant to be solved with --directed
        ("chain4_directed.txt", Graph::new(4, vec![(3, 1), (1, 4), (4, 2)], true)?),
    ];

    for (name, graph) in &examples {
        save_instance(graph, dir.join(name))?;
    }
    debug!("Wrote {} example instances to {}", examples.len(), dir.display());

    Ok(())
}
