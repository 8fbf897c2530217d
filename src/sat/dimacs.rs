#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the DIMACS CNF (Conjunctive Normal Form) file format.
//!
//! The format typically includes:
//! - Comment lines starting with 'c'.
//! - A problem line `p cnf <num_variables> <num_clauses>`. The variable count
//!   sizes the assignment table, so declared but unused variables still get an
//!   entry. The clause count is informational only.
//! - Clauses as whitespace-separated non-zero integers terminated by `0`. A
//!   clause may span several lines, and a lone `0` is the empty clause.
//! - An optional '%' line marking the end of data.

use crate::sat::cnf::Formula;
use crate::sat::error::DimacsError;
use crate::sat::literal::MAX_VARIABLES;
use std::io::{self, BufRead};
use std::path::Path;

/// Parses DIMACS data from any `BufRead` source.
///
/// Without a problem line the variable set is sized to the largest variable
/// mentioned. Literals left unterminated at end of input form a final clause.
///
/// # Errors
///
/// - `DimacsError::Io` if reading fails.
/// - `DimacsError::InvalidLiteral` for a token that is not an `i32`.
/// - `DimacsError::InvalidHeader` for a malformed `p` line or one declaring
///   more than `MAX_VARIABLES` variables.
/// - `DimacsError::Formula` if a literal exceeds the declared variable count,
///   or, without a header, if the largest literal needs too many variables.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Formula, DimacsError> {
    let mut declared_vars: Option<usize> = None;
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut current: Vec<i32> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            Some(&"%") => break,
            None | Some(&"c") => {}
            Some(&"p") => declared_vars = Some(parse_header(&line, line_no)?),
            Some(_) => {
                for token in parts {
                    let value = token
                        .parse::<i32>()
                        .map_err(|_| DimacsError::InvalidLiteral {
                            line: line_no,
                            token: token.to_string(),
                        })?;
                    if value == 0 {
                        clauses.push(std::mem::take(&mut current));
                    } else {
                        current.push(value);
                    }
                }
            }
        }
    }

    if !current.is_empty() {
        clauses.push(current);
    }

    let formula = match declared_vars {
        Some(num_vars) => Formula::from_dimacs_with_vars(num_vars, clauses),
        None => Formula::from_dimacs_clauses(clauses),
    };
    formula.map_err(DimacsError::from)
}

/// Parses `p cnf <vars> <clauses>` and returns the variable count, which
/// must not exceed `MAX_VARIABLES`.
fn parse_header(line: &str, line_no: usize) -> Result<usize, DimacsError> {
    let invalid = || DimacsError::InvalidHeader {
        line: line_no,
        text: line.to_string(),
    };
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        ["p", "cnf", vars, clauses] => {
            clauses.parse::<usize>().map_err(|_| invalid())?;
            vars.parse::<usize>()
                .ok()
                .filter(|&n| n <= MAX_VARIABLES)
                .ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}

/// Parses a DIMACS CNF file.
///
/// # Errors
///
/// `DimacsError::Io` if the file cannot be opened, plus everything
/// [`parse_dimacs`] reports.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Formula, DimacsError> {
    let file = std::fs::File::open(path)?;
    parse_dimacs(io::BufReader::new(file))
}

/// Parses the textual clause form used on the command line, e.g.
/// `"1 -2 0\n2 3 0"`. Each line is a clause; the trailing `0` is optional.
///
/// # Errors
///
/// As [`parse_dimacs`].
pub fn parse_text(input: &str) -> Result<Formula, DimacsError> {
    let mut clauses = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        let literals = line
            .split_whitespace()
            .map(|token| {
                token.parse::<i32>().map_err(|_| DimacsError::InvalidLiteral {
                    line: i + 1,
                    token: token.to_string(),
                })
            })
            .filter(|value| !matches!(value, Ok(0)))
            .collect::<Result<Vec<_>, _>>()?;
        clauses.push(literals);
    }
    Ok(Formula::from_dimacs_clauses(clauses)?)
}
