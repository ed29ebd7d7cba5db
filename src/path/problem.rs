//! Hamiltonian path problem: load, encode, solve, decode

use super::decoder::decode_path;
use super::{HamiltonianPath, PathOutcome, PathValidator, SolveReport};
use crate::config::Settings;
use crate::error::{DecodingError, HamResult};
use crate::graph::{load_instance, Graph, Instance};
use crate::sat::encoder::{ComplexityEstimate, ComplexityLevel, EncodingStatistics};
use crate::sat::{Formula, SatEncoder, SolveOutcome, UnifiedSatSolver};
use crate::utils::SideOutput;
use anyhow::{Context, Result};
use std::fmt;
use tracing::{debug, info};

/// One instance plus the settings it is solved under
pub struct HamiltonianProblem {
    settings: Settings,
    instance: Instance,
    solver: UnifiedSatSolver,
}

impl HamiltonianProblem {
    /// Create a new problem from settings, loading the instance file
    pub fn new(settings: Settings) -> Result<Self> {
        let instance = load_instance(&settings.instance.path, settings.instance.directed)
            .context("Failed to load instance file")?;

        Ok(Self::with_instance(settings, instance))
    }

    /// Create a problem around an already parsed instance
    pub fn with_instance(settings: Settings, instance: Instance) -> Self {
        let solver = UnifiedSatSolver::from_config(&settings.solver);

        Self {
            settings,
            instance,
            solver,
        }
    }

    /// Create a problem with an explicit graph (useful for testing)
    pub fn with_graph(settings: Settings, graph: Graph) -> Self {
        let declared_edges = graph.edges().len();
        Self::with_instance(
            settings,
            Instance {
                graph,
                declared_edges,
            },
        )
    }

    /// Build the formula for this instance
    pub fn encode(&self) -> Formula {
        SatEncoder::new(&self.instance.graph).encode()
    }

    /// Encode, write the CNF file, run the solver and decode its answer
    pub fn solve(&self) -> Result<SolveReport> {
        let graph = &self.instance.graph;
        info!(
            "Solving Hamiltonian path on {} vertices, {} edges ({})",
            graph.vertex_count(),
            graph.edges().len(),
            if graph.is_directed() { "directed" } else { "undirected" }
        );

        let formula = self.encode();
        let cnf_path = &self.settings.output.cnf_output;
        formula
            .save_to_file(cnf_path)
            .with_context(|| format!("Failed to write CNF file: {}", cnf_path.display()))?;
        debug!("Wrote formula to {}", cnf_path.display());

        if self.settings.output.print_cnf {
            SideOutput::for_format(self.settings.output.format).emit(&formula.to_dimacs());
        }

        let run = self
            .solver
            .solve(&formula, Some(cnf_path))
            .context("SAT solving failed")?;
        info!("Solver finished in {:.3}s", run.solve_time.as_secs_f64());

        let outcome = interpret_outcome(graph, &run.outcome).context("Solver model is not a usable path")?;

        Ok(SolveReport {
            outcome,
            vertices: graph.vertex_count(),
            directed: graph.is_directed(),
            variables: formula.num_vars,
            clauses: formula.clause_count(),
            backend: self.solver.backend(),
            solve_time: run.solve_time,
            raw_solver_output: run.raw_output,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.instance.graph
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Get encoding statistics
    pub fn encoding_statistics(&self) -> EncodingStatistics {
        SatEncoder::new(&self.instance.graph).statistics()
    }

    /// Cheap structural checks that can rule out a path before solving
    pub fn estimate_solvability(&self) -> SolvabilityEstimate {
        let graph = &self.instance.graph;
        let complexity = SatEncoder::new(graph).estimate_complexity();
        let obstructions = structural_obstructions(graph);

        let likelihood = if !obstructions.is_empty() {
            SolvabilityLikelihood::Impossible
        } else if complexity.edge_density > 0.5 {
            SolvabilityLikelihood::Likely
        } else {
            SolvabilityLikelihood::Unknown
        };

        let recommendations = build_recommendations(&complexity, &obstructions);

        SolvabilityEstimate {
            likelihood,
            complexity,
            obstructions,
            recommendations,
        }
    }
}

/// Encode, solve and decode a graph in memory.
///
/// Returns `Ok(None)` only on a definite UNSAT verdict; every solver failure is an error.
pub fn find_hamiltonian_path(graph: &Graph, solver: &UnifiedSatSolver) -> HamResult<Option<HamiltonianPath>> {
    let formula = SatEncoder::new(graph).encode();
    let run = solver.solve(&formula, None)?;
    let outcome = interpret_outcome(graph, &run.outcome)?;
    Ok(outcome.path().cloned())
}

/// Turn a solver verdict into a path, cross-checking the decoded order against the graph
fn interpret_outcome(graph: &Graph, outcome: &SolveOutcome) -> Result<PathOutcome, DecodingError> {
    match outcome {
        SolveOutcome::Unsatisfiable => Ok(PathOutcome::NoPath),
        SolveOutcome::Satisfiable(model) => {
            let path = decode_path(graph.vertex_count(), model)?;
            let check = PathValidator::new(graph).validate(&path.vertices);
            if !check.is_valid {
                return Err(DecodingError::NotAPath(
                    check.error_message.unwrap_or_default(),
                ));
            }
            Ok(PathOutcome::Found { path })
        }
    }
}

/// Necessary conditions for a Hamiltonian path that the graph fails
fn structural_obstructions(graph: &Graph) -> Vec<String> {
    let n = graph.vertex_count();
    if n <= 1 {
        return Vec::new();
    }

    let mut obstructions = Vec::new();
    let isolated = graph.isolated_vertices();
    if !isolated.is_empty() {
        obstructions.push(format!("isolated vertices: {:?}", isolated));
    }

    // Connectivity ignoring direction
    let mut parent: Vec<usize> = (0..=n).collect();
    fn find(parent: &mut [usize], mut v: usize) -> usize {
        while parent[v] != v {
            parent[v] = parent[parent[v]];
            v = parent[v];
        }
        v
    }
    for edge in graph.edge_set().iter().filter(|e| !e.is_self_loop()) {
        let (a, b) = (find(&mut parent, edge.from), find(&mut parent, edge.to));
        if a != b {
            parent[a] = b;
        }
    }
    let root = find(&mut parent, 1);
    if (2..=n).any(|v| find(&mut parent, v) != root) {
        obstructions.push("graph is disconnected".to_string());
    }

    if !graph.is_directed() {
        let mut degree = vec![0usize; n + 1];
        for edge in graph.edge_set().iter().filter(|e| !e.is_self_loop()) {
            degree[edge.from] += 1;
            degree[edge.to] += 1;
        }
        let leaves = (1..=n).filter(|&v| degree[v] == 1).count();
        if leaves > 2 {
            obstructions.push(format!("{} vertices of degree 1, a path has at most 2 ends", leaves));
        }
    }

    obstructions
}

fn build_recommendations(complexity: &ComplexityEstimate, obstructions: &[String]) -> Vec<String> {
    let mut recommendations = Vec::new();
    if !obstructions.is_empty() {
        recommendations.push("Solver should answer UNSAT; no path can exist".to_string());
    }
    match complexity.complexity_level {
        ComplexityLevel::High | ComplexityLevel::VeryHigh => {
            recommendations.push("Set solver.timeout_seconds to bound the run".to_string());
        }
        ComplexityLevel::Medium => {
            recommendations.push("Expect a noticeable CNF file; consider a fast local disk".to_string());
        }
        ComplexityLevel::Low => {}
    }
    recommendations
}

/// Solvability estimate for a problem
#[derive(Debug, Clone)]
pub struct SolvabilityEstimate {
    pub likelihood: SolvabilityLikelihood,
    pub complexity: ComplexityEstimate,
    pub obstructions: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolvabilityLikelihood {
    /// A necessary condition fails
    Impossible,
    Unknown,
    /// Dense enough that a path is very probable
    Likely,
}

impl fmt::Display for SolvabilityEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solvability Estimate:")?;
        writeln!(f, "  Likelihood: {:?}", self.likelihood)?;
        for obstruction in &self.obstructions {
            writeln!(f, "  Obstruction: {}", obstruction)?;
        }
        write!(f, "{}", self.complexity)?;

        if !self.recommendations.is_empty() {
            writeln!(f, "  Recommendations:")?;
            for rec in &self.recommendations {
                writeln!(f, "    - {}", rec)?;
            }
        }

        Ok(())
    }
}
