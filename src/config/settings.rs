//! Configuration settings for the Hamiltonian path solver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub instance: InstanceConfig,
    pub solver: SolverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceConfig {
    pub path: PathBuf,
    /// Interpret edges as ordered pairs
    pub directed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    /// Solver binary; searched on PATH when unset
    pub executable: Option<PathBuf>,
    pub model_flag: String,
    #[serde(default)]
    pub extra_args: Vec<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    /// Separate solver process fed a DIMACS file
    External,
    /// Embedded CaDiCaL
    Cadical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the DIMACS formula is written
    pub cnf_output: PathBuf,
    pub print_cnf: bool,
    /// Pass raw solver output through after the result
    pub print_stats: bool,
    pub format: OutputFormat,
    pub solution_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            instance: InstanceConfig {
                path: PathBuf::from("instances/cycle4.txt"),
                directed: false,
            },
            solver: SolverConfig {
                backend: SolverBackend::External,
                executable: None,
                model_flag: "-model".to_string(),
                extra_args: Vec::new(),
                timeout_seconds: None,
            },
            output: OutputConfig {
                cnf_output: PathBuf::from("formula.cnf"),
                print_cnf: false,
                print_stats: false,
                format: OutputFormat::Text,
                solution_file: None,
            },
        }
    }
}

impl SolverConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if !self.instance.path.exists() {
            anyhow::bail!("Instance file does not exist: {}", self.instance.path.display());
        }

        if self.output.cnf_output.as_os_str().is_empty() {
            anyhow::bail!("CNF output path must not be empty");
        }

        if self.solver.timeout_seconds == Some(0) {
            anyhow::bail!("Solver timeout must be positive");
        }

        if self.solver.backend == SolverBackend::External && self.solver.model_flag.trim().is_empty() {
            anyhow::bail!("External solver needs a model flag (e.g. -model)");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref instance) = cli_overrides.instance {
            self.instance.path = instance.clone();
        }
        if cli_overrides.directed {
            self.instance.directed = true;
        }
        if let Some(backend) = cli_overrides.backend {
            self.solver.backend = backend;
        }
        if let Some(ref solver) = cli_overrides.solver {
            self.solver.executable = Some(solver.clone());
        }
        if let Some(timeout) = cli_overrides.timeout_seconds {
            self.solver.timeout_seconds = Some(timeout);
        }
        if let Some(ref cnf_output) = cli_overrides.cnf_output {
            self.output.cnf_output = cnf_output.clone();
        }
        if cli_overrides.print_cnf {
            self.output.print_cnf = true;
        }
        if cli_overrides.print_stats {
            self.output.print_stats = true;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(ref solution_file) = cli_overrides.solution_file {
            self.output.solution_file = Some(solution_file.clone());
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub instance: Option<PathBuf>,
    /// Flags can only switch an option on
    pub directed: bool,
    pub backend: Option<SolverBackend>,
    pub solver: Option<PathBuf>,
    pub timeout_seconds: Option<u64>,
    pub cnf_output: Option<PathBuf>,
    pub print_cnf: bool,
    pub print_stats: bool,
    pub format: Option<OutputFormat>,
    pub solution_file: Option<PathBuf>,
}
