//! DIMACS CNF serialization of the encoded formula
//!
//! ```text
//! p cnf <num_vars> <num_clauses>
//! <lit1> <lit2> ... 0
//! ```

use super::constraints::Clause;
use super::Model;
use crate::error::DimacsError;
use anyhow::{Context, Result};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// A CNF formula: clause set plus declared variable count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    pub num_vars: usize,
    pub clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(num_vars: usize, clauses: Vec<Clause>) -> Self {
        Self { num_vars, clauses }
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Write the formula in DIMACS format, clauses in their stored order
    pub fn write_dimacs<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut writer = BufWriter::new(writer);
        writeln!(writer, "p cnf {} {}", self.num_vars, self.clauses.len())?;

        for clause in &self.clauses {
            for lit in &clause.literals {
                write!(writer, "{} ", lit)?;
            }
            writeln!(writer, "0")?;
        }

        writer.flush()
    }

    /// Render the formula as a DIMACS string
    pub fn to_dimacs(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_dimacs(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Save the formula to a DIMACS file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create CNF file: {}", path.display()))?;
        self.write_dimacs(file)
            .with_context(|| format!("Failed to write CNF file: {}", path.display()))?;

        Ok(())
    }

    /// Index of the first clause the model falsifies, if any
    pub fn first_violated_clause(&self, model: &Model) -> Option<usize> {
        self.clauses.iter().position(|clause| !clause.is_satisfied_by(model))
    }

    pub fn is_satisfied_by(&self, model: &Model) -> bool {
        self.first_violated_clause(model).is_none()
    }
}

/// Parse a DIMACS CNF document.
///
/// Comment lines (`c ...`) are skipped, a `%` line ends the data, and clauses may span lines.
pub fn parse_dimacs(content: &str) -> Result<Formula, DimacsError> {
    let mut header: Option<(usize, usize)> = None;
    let mut clauses = Vec::new();
    let mut current = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if line.starts_with('%') {
            break;
        }
        if line.starts_with('p') {
            header = Some(parse_header(line, line_no)?);
            continue;
        }

        let Some((num_vars, _)) = header else {
            return Err(DimacsError::MissingHeader);
        };

        for token in line.split_whitespace() {
            let literal: i32 = token.parse().map_err(|_| DimacsError::BadLiteral {
                line: line_no,
                token: token.to_string(),
            })?;

            if literal == 0 {
                clauses.push(Clause::new(std::mem::take(&mut current)));
            } else if literal.unsigned_abs() as usize > num_vars {
                return Err(DimacsError::VariableOutOfRange { literal, num_vars });
            } else {
                current.push(literal);
            }
        }
    }

    let (num_vars, declared) = header.ok_or(DimacsError::MissingHeader)?;
    if !current.is_empty() {
        return Err(DimacsError::UnterminatedClause);
    }
    if declared != clauses.len() {
        return Err(DimacsError::ClauseCountMismatch {
            declared,
            found: clauses.len(),
        });
    }

    Ok(Formula::new(num_vars, clauses))
}

fn parse_header(line: &str, line_no: usize) -> Result<(usize, usize), DimacsError> {
    let bad = || DimacsError::BadHeader {
        line: line_no,
        content: line.to_string(),
    };

    match line.split_whitespace().collect::<Vec<_>>()[..] {
        ["p", "cnf", vars, clauses] => Ok((
            vars.parse().map_err(|_| bad())?,
            clauses.parse().map_err(|_| bad())?,
        )),
        _ => Err(bad()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::sat::ConstraintGenerator;

    #[test]
    fn test_serialization_format() {
        let formula = Formula::new(3, vec![Clause::new(vec![1, -2]), Clause::new(vec![3])]);
        assert_eq!(formula.to_dimacs(), "p cnf 3 2\n1 -2 0\n3 0\n");
    }

    #[test]
    fn test_empty_formula() {
        let formula = Formula::new(0, vec![]);
        assert_eq!(formula.to_dimacs(), "p cnf 0 0\n");
        assert_eq!(parse_dimacs("p cnf 0 0\n").unwrap(), formula);
    }

    #[test]
    fn test_encoded_graph_round_trip() {
        let graph = Graph::new(4, vec![(1, 2), (2, 3), (3, 4), (4, 1)], false).unwrap();
        let clauses = ConstraintGenerator::new(&graph).generate_all_constraints();
        let formula = Formula::new(16, clauses);

        let parsed = parse_dimacs(&formula.to_dimacs()).unwrap();
        assert_eq!(parsed, formula);
    }

    #[test]
    fn test_parse_comments_and_split_clauses() {
        let input = "c generated\np cnf 3 2\n1 -2\n 3 0\n-3 0\n%\n0\n";
        let formula = parse_dimacs(input).unwrap();
        assert_eq!(formula.num_vars, 3);
        assert_eq!(
            formula.clauses,
            vec![Clause::new(vec![1, -2, 3]), Clause::new(vec![-3])]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_dimacs("1 2 0\n").unwrap_err(), DimacsError::MissingHeader);
        assert!(matches!(
            parse_dimacs("p cnf x 1\n"),
            Err(DimacsError::BadHeader { line: 1, .. })
        ));
        assert!(matches!(
            parse_dimacs("p cnf 2 1\n1 b 0\n"),
            Err(DimacsError::BadLiteral { line: 2, .. })
        ));
        assert_eq!(
            parse_dimacs("p cnf 2 1\n1 3 0\n").unwrap_err(),
            DimacsError::VariableOutOfRange { literal: 3, num_vars: 2 }
        );
        assert_eq!(
            parse_dimacs("p cnf 2 1\n1 2\n").unwrap_err(),
            DimacsError::UnterminatedClause
        );
        assert_eq!(
            parse_dimacs("p cnf 2 2\n1 2 0\n").unwrap_err(),
            DimacsError::ClauseCountMismatch { declared: 2, found: 1 }
        );
    }

    #[test]
    fn test_first_violated_clause() {
        let formula = Formula::new(2, vec![Clause::new(vec![1]), Clause::binary(-1, 2), Clause::new(vec![-2])]);
        let model = Model::from_literals([1, 2]);
        assert_eq!(formula.first_violated_clause(&model), Some(2));
        assert!(!formula.is_satisfied_by(&model));
    }

    #[test]
    fn test_save_to_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out/formula.cnf");
        let formula = Formula::new(2, vec![Clause::binary(1, 2)]);

        formula.save_to_file(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(parse_dimacs(&content).unwrap(), formula);
    }
}
