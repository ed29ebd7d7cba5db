//! External SAT solver process (Glucose-compatible command line)

use super::dimacs::Formula;
use super::solver::{parse_solver_output, SolverRun};
use crate::error::SolverError;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;
use wait_timeout::ChildExt;

/// Executables tried in order when no solver path is configured
pub const DEFAULT_SOLVER_NAMES: [&str; 3] = ["glucose", "glucose-simp", "glucose-syrup"];

/// Glucose exits with 10 on SAT and 20 on UNSAT
const VERDICT_EXIT_CODES: [i32; 3] = [0, 10, 20];

/// Configuration options for the external solver
#[derive(Debug, Clone)]
pub struct ExternalSolverOptions {
    pub executable: Option<PathBuf>,
    /// Flag asking the solver to print the model
    pub model_flag: String,
    pub extra_args: Vec<String>,
    pub timeout: Option<Duration>,
}

impl Default for ExternalSolverOptions {
    fn default() -> Self {
        Self {
            executable: None,
            model_flag: "-model".to_string(),
            extra_args: Vec::new(),
            timeout: None,
        }
    }
}

/// Runs a solver binary on a DIMACS file and reads back its verdict
#[derive(Debug, Clone)]
pub struct ExternalSolver {
    options: ExternalSolverOptions,
}

impl ExternalSolver {
    pub fn new(options: ExternalSolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExternalSolverOptions {
        &self.options
    }

    /// Locate the solver binary
    pub fn resolve_executable(&self) -> Result<PathBuf, SolverError> {
        match &self.options.executable {
            Some(path) => which::which(path)
                .map_err(|_| SolverError::NotFound(path.display().to_string())),
            None => DEFAULT_SOLVER_NAMES
                .iter()
                .find_map(|name| which::which(name).ok())
                .ok_or_else(|| {
                    SolverError::NotFound(format!(
                        "none of {} on PATH",
                        DEFAULT_SOLVER_NAMES.join(", ")
                    ))
                }),
        }
    }

    /// Write the formula to a temporary file and solve it
    pub fn solve(&self, formula: &Formula) -> Result<SolverRun, SolverError> {
        let mut temp_file = tempfile::Builder::new().suffix(".cnf").tempfile()?;
        formula.write_dimacs(temp_file.as_file_mut())?;

        let path = temp_file.path().to_path_buf();
        let result = self.solve_file(&path);
        let _ = temp_file.close();

        result
    }

    /// Solve a DIMACS file already on disk
    pub fn solve_file(&self, cnf_path: &Path) -> Result<SolverRun, SolverError> {
        let program = self.resolve_executable()?;
        let start = Instant::now();

        // Output goes to files rather than pipes so a chatty solver cannot block on a full pipe
        let mut stdout_file = tempfile::tempfile()?;
        let mut stderr_file = tempfile::tempfile()?;

        let mut cmd = Command::new(&program);
        if !self.options.model_flag.is_empty() {
            cmd.arg(&self.options.model_flag);
        }
        cmd.args(&self.options.extra_args)
            .arg(cnf_path)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout_file.try_clone()?))
            .stderr(Stdio::from(stderr_file.try_clone()?));

        debug!("Running solver: {:?}", cmd);

        let mut child = cmd.spawn().map_err(|source| SolverError::Launch {
            program: program.display().to_string(),
            source,
        })?;

        let status = match self.options.timeout {
            Some(timeout) => match child.wait_timeout(timeout)? {
                Some(status) => status,
                None => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(SolverError::Timeout(timeout));
                }
            },
            None => child.wait()?,
        };
        let solve_time = start.elapsed();

        let stdout = read_back(&mut stdout_file)?;
        let stderr = read_back(&mut stderr_file)?;
        debug!("Solver exited with {} after {:.3}s", status, solve_time.as_secs_f64());

        let raw_output = if stderr.is_empty() {
            stdout
        } else {
            format!("{}\n{}", stdout, stderr)
        };
        debug!("Solver output:\n{}", raw_output);

        let outcome = match parse_solver_output(&raw_output) {
            Ok(outcome) => outcome,
            Err(err) if !exited_normally(status) => {
                debug!("Unparseable output from failed solver: {}", err);
                return Err(SolverError::Crashed {
                    status: status.to_string(),
                    stderr: last_lines(&raw_output, 3),
                });
            }
            Err(err) => return Err(err),
        };

        Ok(SolverRun {
            outcome,
            solve_time,
            raw_output: Some(raw_output),
        })
    }
}

fn exited_normally(status: ExitStatus) -> bool {
    status
        .code()
        .is_some_and(|code| VERDICT_EXIT_CODES.contains(&code))
}

fn read_back(file: &mut File) -> std::io::Result<String> {
    let mut bytes = Vec::new();
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn last_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    lines[lines.len().saturating_sub(count)..].join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ExternalSolverOptions::default();
        assert_eq!(options.model_flag, "-model");
        assert!(options.executable.is_none());
        assert!(options.timeout.is_none());
    }

    #[test]
    fn test_missing_executable() {
        let solver = ExternalSolver::new(ExternalSolverOptions {
            executable: Some(PathBuf::from("/nonexistent/glucose-binary")),
            ..Default::default()
        });
        assert!(matches!(
            solver.resolve_executable(),
            Err(SolverError::NotFound(_))
        ));
        assert!(matches!(
            solver.solve(&Formula::new(1, vec![])),
            Err(SolverError::NotFound(_))
        ));
    }

    #[test]
    fn test_last_lines() {
        assert_eq!(last_lines("a\n\nb\nc\nd\n", 3), "b; c; d");
        assert_eq!(last_lines("only\n", 3), "only");
        assert_eq!(last_lines("", 3), "");
    }
}
