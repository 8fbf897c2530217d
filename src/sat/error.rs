//! Error types for formula construction, parsing and solver configuration.
//!
//! Unsatisfiability and an exhausted local search are not errors; they are
//! reported through `SolveResult`.

use crate::sat::literal::Variable;
use thiserror::Error;

/// Rejected formula input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// A clause mentions a variable outside the declared variable set.
    #[error("clause {clause} references undeclared variable {variable}")]
    UnknownVariable {
        /// The offending variable.
        variable: Variable,
        /// Index of the clause it appears in.
        clause: usize,
    },

    /// The variable set is larger than `MAX_VARIABLES` or could not be
    /// allocated.
    #[error("cannot hold {num_vars} variables")]
    TooManyVariables {
        /// The requested number of variables.
        num_vars: usize,
    },

    /// A DIMACS clause contained `0`, which is only valid as a terminator.
    #[error("clause {clause} contains the literal 0")]
    ZeroLiteral {
        /// Index of the clause.
        clause: usize,
    },
}

/// Failure while reading DIMACS input.
#[derive(Debug, Error)]
pub enum DimacsError {
    /// Underlying reader failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A token that should have been an integer literal.
    #[error("line {line}: failed to parse literal '{token}'")]
    InvalidLiteral {
        /// 1-based line number.
        line: usize,
        /// The token as read.
        token: String,
    },

    /// A `p` line that is not `p cnf <vars> <clauses>`.
    #[error("line {line}: malformed problem line '{text}'")]
    InvalidHeader {
        /// 1-based line number.
        line: usize,
        /// The whole line.
        text: String,
    },

    /// The clauses do not fit the declared variable count.
    #[error(transparent)]
    Formula(#[from] FormulaError),
}

/// Rejected generator parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// Each clause draws distinct variables, so `k` cannot exceed the pool.
    #[error("cannot draw {k} distinct variables from {num_vars}")]
    ClauseTooWide {
        /// Literals per clause.
        k: usize,
        /// Size of the variable pool.
        num_vars: usize,
    },

    /// More variables than a formula may declare.
    #[error("cannot generate a formula over {num_vars} variables")]
    TooManyVariables {
        /// The requested pool size.
        num_vars: usize,
    },
}

/// Errors reported by the solver dispatcher. Fatal to the call only.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolveError {
    /// The method name is neither `complete` nor `incomplete`.
    #[error("unknown solving method '{0}', expected 'complete' or 'incomplete'")]
    UnknownMethod(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
