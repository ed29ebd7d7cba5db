//! Command line front end for the Hamiltonian path SAT solver

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use hamiltonian_sat::{
    config::{CliOverrides, OutputFormat, Settings, SolverBackend},
    graph::{create_example_instances, load_instance},
    path::{HamiltonianProblem, PathValidator},
    utils::{ColorOutput, SideOutput, SolutionFormatter},
};
use std::path::{Path, PathBuf};
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "hamiltonian_sat")]
#[command(about = "Hamiltonian Path -> SAT -> solver")]
#[command(version)]
struct Cli {
    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads an instance
#[derive(Args, Debug)]
struct InstanceArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Graph instance file (overrides config)
    #[arg(short, long)]
    instance: Option<PathBuf>,

    /// Treat edges as ordered pairs
    #[arg(long)]
    directed: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode an instance, run the solver and print the path
    Solve {
        #[command(flatten)]
        instance: InstanceArgs,

        /// Solver executable, e.g. a Glucose binary (overrides config)
        #[arg(long, alias = "glucose")]
        solver: Option<PathBuf>,

        /// Solver backend (overrides config)
        #[arg(long, value_enum)]
        backend: Option<BackendArg>,

        /// Solver timeout in seconds (overrides config)
        #[arg(long)]
        timeout: Option<u64>,

        /// Where to write the CNF formula (overrides config)
        #[arg(long)]
        cnf_output: Option<PathBuf>,

        /// Also print the CNF formula to stdout
        #[arg(long)]
        print_cnf: bool,

        /// Print the raw solver output after the result
        #[arg(long)]
        print_stats: bool,

        /// Result format (overrides config)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Write the result to this file instead of stdout
        #[arg(short, long)]
        solution_file: Option<PathBuf>,

        /// Show formula size, timing and a position table
        #[arg(long)]
        details: bool,
    },

    /// Write the CNF formula without solving
    Encode {
        #[command(flatten)]
        instance: InstanceArgs,

        /// Output file (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also print the CNF formula to stdout
        #[arg(long)]
        print_cnf: bool,
    },

    /// Check a vertex order against an instance
    Validate {
        #[command(flatten)]
        instance: InstanceArgs,

        /// Vertices in visiting order, e.g. 1,2,3,4
        #[arg(short, long, value_delimiter = ',', required = true)]
        path: Vec<usize>,
    },

    /// Report formula size and structural obstructions for an instance
    Analyze {
        #[command(flatten)]
        instance: InstanceArgs,
    },

    /// Create a default configuration and example instances
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendArg {
    External,
    Cadical,
}

impl From<BackendArg> for SolverBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::External => SolverBackend::External,
            BackendArg::Cadical => SolverBackend::Cadical,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Solve {
            instance,
            solver,
            backend,
            timeout,
            cnf_output,
            print_cnf,
            print_stats,
            format,
            solution_file,
            details,
        } => {
            let overrides = CliOverrides {
                instance: instance.instance.clone(),
                directed: instance.directed,
                backend: backend.map(Into::into),
                solver,
                timeout_seconds: timeout,
                cnf_output,
                print_cnf,
                print_stats,
                format: format.map(Into::into),
                solution_file,
            };
            solve_command(&instance.config, &overrides, details)
        }
        Commands::Encode {
            instance,
            output,
            print_cnf,
        } => {
            let overrides = CliOverrides {
                instance: instance.instance.clone(),
                directed: instance.directed,
                cnf_output: output,
                print_cnf,
                ..Default::default()
            };
            encode_command(&instance.config, &overrides)
        }
        Commands::Validate { instance, path } => validate_command(&instance, &path),
        Commands::Analyze { instance } => analyze_command(&instance),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to install logger")?;
    Ok(())
}

/// Load the config file, or defaults when it does not exist, then apply overrides
fn load_settings(config_path: &PathBuf, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        warn!("Config file {} not found, using defaults", config_path.display());
        Settings::default()
    };
    settings.merge_with_cli(overrides);
    Ok(settings)
}

fn solve_command(config_path: &PathBuf, overrides: &CliOverrides, details: bool) -> Result<()> {
    let settings = load_settings(config_path, overrides)?;
    settings.validate().context("Configuration validation failed")?;

    let problem = HamiltonianProblem::new(settings.clone()).context("Failed to create problem")?;
    let report = problem.solve().context("Failed to solve instance")?;

    match &settings.output.solution_file {
        Some(file) => {
            SolutionFormatter::save_report(&report, file, settings.output.format)
                .context("Failed to save solution")?;
            println!(
                "{}",
                ColorOutput::success(&format!("Result saved to {}", file.display()))
            );
        }
        None => match settings.output.format {
            OutputFormat::Text => {
                let text = SolutionFormatter::format_report(&report, details);
                if report.is_found() {
                    print!("{}", ColorOutput::success(&text));
                } else {
                    print!("{}", ColorOutput::warning(&text));
                }
            }
            OutputFormat::Json => print!("{}", SolutionFormatter::render(&report, OutputFormat::Json)?),
        },
    }

    if settings.output.print_stats {
        if let Some(raw) = &report.raw_solver_output {
            SideOutput::for_format(settings.output.format)
                .emit(&format!("\n--- solver output ---\n{}", raw));
        }
    }

    Ok(())
}

fn encode_command(config_path: &PathBuf, overrides: &CliOverrides) -> Result<()> {
    let settings = load_settings(config_path, overrides)?;
    let problem = HamiltonianProblem::new(settings.clone()).context("Failed to create problem")?;

    let formula = problem.encode();
    let cnf_path = &settings.output.cnf_output;
    formula
        .save_to_file(cnf_path)
        .with_context(|| format!("Failed to write CNF file: {}", cnf_path.display()))?;

    if settings.output.print_cnf {
        print!("{}", formula.to_dimacs());
    }
    println!(
        "{}",
        ColorOutput::success(&format!(
            "Wrote {} variables, {} clauses to {}",
            formula.num_vars,
            formula.clause_count(),
            cnf_path.display()
        ))
    );
    Ok(())
}

fn validate_command(args: &InstanceArgs, path: &[usize]) -> Result<()> {
    let overrides = CliOverrides {
        instance: args.instance.clone(),
        directed: args.directed,
        ..Default::default()
    };
    let settings = load_settings(&args.config, &overrides)?;
    let instance = load_instance(&settings.instance.path, settings.instance.directed)?;

    let result = PathValidator::new(&instance.graph).validate(path);
    print!("{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("Path is a Hamiltonian path"));
    } else {
        println!("{}", ColorOutput::error("Path is not a Hamiltonian path"));
    }
    Ok(())
}

fn analyze_command(args: &InstanceArgs) -> Result<()> {
    let overrides = CliOverrides {
        instance: args.instance.clone(),
        directed: args.directed,
        ..Default::default()
    };
    let settings = load_settings(&args.config, &overrides)?;
    let problem = HamiltonianProblem::new(settings).context("Failed to create problem for analysis")?;

    if let Some(mismatch) = problem.instance().edge_count_mismatch() {
        println!("{}", ColorOutput::warning(&format!("Warning: {}", mismatch)));
    }
    println!("{}", problem.graph());
    println!("{}", problem.encoding_statistics());
    println!("{}", problem.estimate_solvability());
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_dir = directory.join("config");
    let instance_dir = directory.join("instances");

    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    let config_path = config_dir.join("default.yaml");
    let mut settings = Settings::default();
    settings.instance.path = instance_dir.join("cycle4.txt");
    write_config(&config_path, &settings, force).context("Failed to create default configuration")?;

    let mut embedded = Settings::default();
    embedded.solver.backend = SolverBackend::Cadical;
    embedded.instance.path = instance_dir.join("petersen.txt");
    write_config(&config_dir.join("cadical.yaml"), &embedded, force)
        .context("Failed to create CaDiCaL configuration")?;

    create_example_instances(&instance_dir).context("Failed to create example instances")?;
    println!(
        "{}",
        ColorOutput::info(&format!("Created example instances in: {}", instance_dir.display()))
    );

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Put a Glucose binary on PATH or set solver.executable in {}", config_path.display());
    println!("2. Run: hamiltonian_sat solve --config {}", config_path.display());
    Ok(())
}

/// Write a configuration file unless one exists and `force` is off
fn write_config(path: &Path, settings: &Settings, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Skipped: {} (already exists)", path.display());
        return Ok(());
    }
    settings.to_file(&path.to_path_buf())?;
    println!("{}", ColorOutput::info(&format!("Created: {}", path.display())));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "hamiltonian_sat",
            "solve",
            "--instance",
            "g.txt",
            "--glucose",
            "/opt/glucose",
            "--directed",
            "--print-stats",
        ])
        .unwrap();

        let Commands::Solve { instance, solver, print_stats, .. } = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(instance.instance, Some(PathBuf::from("g.txt")));
        assert!(instance.directed);
        assert_eq!(solver, Some(PathBuf::from("/opt/glucose")));
        assert!(print_stats);
    }

    #[test]
    fn test_validate_path_list() {
        let cli = Cli::try_parse_from(["hamiltonian_sat", "validate", "--path", "3,1,2"]).unwrap();
        let Commands::Validate { path, .. } = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(path, vec![3, 1, 2]);
    }

    #[test]
    fn test_backend_flag() {
        let cli = Cli::try_parse_from(["hamiltonian_sat", "solve", "--backend", "cadical"]).unwrap();
        let Commands::Solve { backend, .. } = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(backend.map(SolverBackend::from), Some(SolverBackend::Cadical));
        assert!(Cli::try_parse_from(["hamiltonian_sat", "solve", "--backend", "minisat"]).is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let config_path = temp_dir.path().join("config/default.yaml");
        assert!(config_path.exists());
        assert!(temp_dir.path().join("instances/petersen.txt").exists());

        let settings = Settings::from_file(&config_path).unwrap();
        assert!(settings.instance.path.ends_with("instances/cycle4.txt"));

        let cadical_path = temp_dir.path().join("config/cadical.yaml");
        let embedded = Settings::from_file(&cadical_path).unwrap();
        assert_eq!(embedded.solver.backend, SolverBackend::Cadical);
    }

    #[test]
    fn test_setup_keeps_edited_configs_unless_forced() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let default_path = temp_dir.path().join("config/default.yaml");
        let cadical_path = temp_dir.path().join("config/cadical.yaml");
        for path in [&default_path, &cadical_path] {
            let mut edited = Settings::from_file(path).unwrap();
            edited.solver.timeout_seconds = Some(7);
            edited.to_file(path).unwrap();
        }

        setup_command(temp_dir.path().to_path_buf(), false).unwrap();
        for path in [&default_path, &cadical_path] {
            assert_eq!(Settings::from_file(path).unwrap().solver.timeout_seconds, Some(7));
        }

        setup_command(temp_dir.path().to_path_buf(), true).unwrap();
        for path in [&default_path, &cadical_path] {
            assert_eq!(
                Settings::from_file(path).unwrap().solver.timeout_seconds,
                Settings::default().solver.timeout_seconds
            );
        }
    }

    #[test]
    fn test_solve_command_with_cadical() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let solution = temp_dir.path().join("solution.json");
        let overrides = CliOverrides {
            backend: Some(SolverBackend::Cadical),
            cnf_output: Some(temp_dir.path().join("formula.cnf")),
            format: Some(OutputFormat::Json),
            solution_file: Some(solution.clone()),
            ..Default::default()
        };
        solve_command(&temp_dir.path().join("config/default.yaml"), &overrides, false).unwrap();

        let report = hamiltonian_sat::SolveReport::load_from_file(&solution).unwrap();
        assert!(report.is_found());
        assert!(temp_dir.path().join("formula.cnf").exists());
    }
}
