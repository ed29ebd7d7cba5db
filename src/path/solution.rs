//! Result types for Hamiltonian path solving

use crate::config::SolverBackend;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// An ordering of all vertices, 1-based, where consecutive vertices are adjacent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HamiltonianPath {
    pub vertices: Vec<usize>,
}

impl HamiltonianPath {
    pub fn new(vertices: Vec<usize>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl fmt::Display for HamiltonianPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.vertices.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", rendered.join(" -> "))
    }
}

/// Final answer for one instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PathOutcome {
    Found { path: HamiltonianPath },
    NoPath,
}

impl PathOutcome {
    pub fn path(&self) -> Option<&HamiltonianPath> {
        match self {
            PathOutcome::Found { path } => Some(path),
            PathOutcome::NoPath => None,
        }
    }
}

/// Everything known about one solve, serialisable for `--format json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    #[serde(flatten)]
    pub outcome: PathOutcome,
    pub vertices: usize,
    pub directed: bool,
    pub variables: usize,
    pub clauses: usize,
    pub backend: SolverBackend,
    /// Time spent inside the solver
    #[serde(skip)]
    pub solve_time: Duration,
    #[serde(skip)]
    pub raw_solver_output: Option<String>,
}

impl SolveReport {
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, PathOutcome::Found { .. })
    }

    pub fn path(&self) -> Option<&HamiltonianPath> {
        self.outcome.path()
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}
