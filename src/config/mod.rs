//! Configuration management for the Hamiltonian path solver

pub mod settings;

pub use settings::{
    CliOverrides, InstanceConfig, OutputConfig, OutputFormat, Settings, SolverBackend, SolverConfig,
};
