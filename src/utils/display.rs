//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::path::{HamiltonianPath, PathOutcome, SolveReport};
use anyhow::{Context, Result};
use std::path::Path;

/// Format solve results for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// The result line(s): the path in order, or an explicit no-path statement
    pub fn format_outcome(outcome: &PathOutcome) -> String {
        match outcome {
            PathOutcome::Found { path } => format!("Hamiltonian path found:\n{}\n", path),
            PathOutcome::NoPath => "No Hamiltonian path exists.\n".to_string(),
        }
    }

    /// Format a report for console output
    pub fn format_report(report: &SolveReport, show_details: bool) -> String {
        let mut output = Self::format_outcome(&report.outcome);

        if show_details {
            output.push('\n');
            output.push_str(&format!(
                "Graph: {} vertices ({})\n",
                report.vertices,
                if report.directed { "directed" } else { "undirected" }
            ));
            output.push_str(&format!("Formula: {} variables, {} clauses\n", report.variables, report.clauses));
            output.push_str(&format!("Backend: {:?}\n", report.backend));
            output.push_str(&format!("Solve Time: {:.3}s\n", report.solve_time.as_secs_f64()));
            if let Some(path) = report.path() {
                output.push('\n');
                output.push_str(&Self::format_path_table(path));
            }
        }

        output
    }

    /// Position/vertex table for a path
    pub fn format_path_table(path: &HamiltonianPath) -> String {
        let mut output = String::new();
        output.push_str("Position | Vertex\n");
        output.push_str("---------|-------\n");
        for (idx, vertex) in path.vertices.iter().enumerate() {
            output.push_str(&format!("{:8} | {}\n", idx + 1, vertex));
        }
        output
    }

    /// Render the report in the requested output format
    pub fn render(report: &SolveReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(Self::format_report(report, false)),
            OutputFormat::Json => {
                let mut json = report.to_json().context("Failed to serialize report")?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    /// Save the rendered report to a file
    pub fn save_report<P: AsRef<Path>>(report: &SolveReport, path: P, format: OutputFormat) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = Self::render(report, format)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write solution file: {}", path.display()))?;
        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

/// Stream for text that accompanies the report, such as the CNF listing or raw solver output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideOutput {
    Stdout,
    Stderr,
}

impl SideOutput {
    /// JSON output keeps stdout to the report alone
    pub fn for_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => SideOutput::Stdout,
            OutputFormat::Json => SideOutput::Stderr,
        }
    }

    pub fn emit(self, text: &str) {
        match self {
            SideOutput::Stdout => print!("{}", text),
            SideOutput::Stderr => eprint!("{}", text),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
