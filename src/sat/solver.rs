//! The common solver interface and the strategy dispatcher.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Formula;
use crate::sat::configs::{SolverConfig, SolverType};
use crate::sat::dpll::Dpll;
use crate::sat::error::SolveError;
use crate::sat::walksat::WalkSat;
use log::info;

/// Outcome of one solving run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    /// A model was found.
    Satisfiable(Assignment),
    /// No model exists. Only the complete solver (or an input that already
    /// contains the empty clause) yields this.
    Unsatisfiable,
    /// The local search ran out of flips and restarts. Says nothing about
    /// satisfiability.
    Exhausted,
}

impl SolveResult {
    /// The model, if one was found.
    #[must_use]
    pub const fn model(&self) -> Option<&Assignment> {
        match self {
            Self::Satisfiable(model) => Some(model),
            _ => None,
        }
    }

    /// Consumes the result, keeping the model if any.
    #[must_use]
    pub fn into_model(self) -> Option<Assignment> {
        match self {
            Self::Satisfiable(model) => Some(model),
            _ => None,
        }
    }

    /// Whether a model was found.
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }
}

/// Counters collected during a run. Fields a strategy does not use stay zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Branch variables chosen by the backtracking search.
    pub decisions: usize,
    /// Search nodes whose simplification derived the empty clause. Each one
    /// ends its branch; a node that fails only because both children failed
    /// is not counted.
    pub conflicts: usize,
    /// Simplification rounds over all branches.
    pub simplify_rounds: usize,
    /// Random restarts of the local search.
    pub restarts: usize,
    /// Budgeted (coin-toss) flips of the local search.
    pub flips: usize,
    /// Flips that broke no satisfied clause and were taken for free.
    pub freebies: usize,
}

/// A satisfiability strategy over one formula.
pub trait Solver {
    /// Prepares a solver for `formula`.
    fn new(formula: Formula, config: &SolverConfig) -> Self;

    /// Runs the search.
    fn solve(&mut self) -> SolveResult;

    /// Counters from the last `solve`.
    fn stats(&self) -> SolutionStats;
}

/// Runs the strategy named by `method` on `formula`.
///
/// `method` is `complete`/`dpll` or `incomplete`/`walksat`.
///
/// # Errors
///
/// `SolveError::UnknownMethod` for any other name and
/// `SolveError::InvalidConfiguration` for out-of-range parameters. Neither is
/// a statement about the formula.
pub fn solve(
    formula: Formula,
    method: &str,
    config: &SolverConfig,
) -> Result<SolveResult, SolveError> {
    let solver_type: SolverType = method.parse()?;
    solve_with(formula, solver_type, config).map(|(result, _)| result)
}

/// Like [`solve`], with the strategy already chosen, also returning the run's
/// counters.
///
/// # Errors
///
/// `SolveError::InvalidConfiguration` for out-of-range parameters.
pub fn solve_with(
    formula: Formula,
    solver_type: SolverType,
    config: &SolverConfig,
) -> Result<(SolveResult, SolutionStats), SolveError> {
    info!(
        "solving {} clauses over {} variables with the {solver_type} method",
        formula.num_clauses(),
        formula.num_vars()
    );
    let (result, stats) = match solver_type {
        SolverType::Complete => run::<Dpll>(formula, config),
        SolverType::Incomplete => {
            config.walksat.validate()?;
            run::<WalkSat>(formula, config)
        }
    };
    info!("outcome: {}", outcome_name(&result));
    Ok((result, stats))
}

fn run<S: Solver>(formula: Formula, config: &SolverConfig) -> (SolveResult, SolutionStats) {
    let mut solver = S::new(formula, config);
    let result = solver.solve();
    (result, solver.stats())
}

const fn outcome_name(result: &SolveResult) -> &'static str {
    match result {
        SolveResult::Satisfiable(_) => "satisfiable",
        SolveResult::Unsatisfiable => "unsatisfiable",
        SolveResult::Exhausted => "search exhausted",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::configs::WalkSatConfig;

    fn formula(clauses: Vec<Vec<i32>>) -> Formula {
        Formula::from_dimacs_clauses(clauses).unwrap()
    }

    #[test]
    fn test_dispatch_complete() {
        let f = formula(vec![vec![1, 2], vec![-1]]);
        let result = solve(f.clone(), "complete", &SolverConfig::default()).unwrap();
        assert!(f.verify(result.model().unwrap()));
    }

    #[test]
    fn test_dispatch_incomplete() {
        let f = formula(vec![vec![1, 2], vec![-1]]);
        let config = SolverConfig {
            walksat: WalkSatConfig {
                flip_budget: 50,
                restart_budget: 10,
                seed: Some(1),
                ..WalkSatConfig::default()
            },
        };
        let result = solve(f.clone(), "incomplete", &config).unwrap();
        let model = result.into_model().unwrap();
        assert!(model.is_total());
        assert!(f.verify(&model));
    }

    #[test]
    fn test_unknown_method_is_an_error() {
        let f = formula(vec![vec![1]]);
        assert_eq!(
            solve(f, "genetic", &SolverConfig::default()),
            Err(SolveError::UnknownMethod("genetic".to_string()))
        );
    }

    #[test]
    fn test_invalid_bias_is_an_error() {
        let f = formula(vec![vec![1]]);
        let config = SolverConfig {
            walksat: WalkSatConfig {
                bias: 2.0,
                ..WalkSatConfig::default()
            },
        };
        assert!(matches!(
            solve(f, "incomplete", &config),
            Err(SolveError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_unsat_is_a_value_not_an_error() {
        let f = formula(vec![vec![1], vec![-1]]);
        assert_eq!(
            solve(f, "complete", &SolverConfig::default()),
            Ok(SolveResult::Unsatisfiable)
        );
    }
}
