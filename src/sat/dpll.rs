//! Defines the complete DPLL (Davis-Putnam-Logemann-Loveland) solver.
//!
//! The search works on value-semantics copies of the formula. Each call:
//! 1.  **Simplifies** the formula to a fixed point (pure literals, unit
//!     clauses, reduction; see [`crate::sat::simplify`]).
//! 2.  Returns the assignment as a model if no clause is left.
//! 3.  Abandons the branch if the empty clause was derived.
//! 4.  Otherwise picks the first `Unknown` variable in table order, tries it
//!     `True` on a copy of the simplified formula, and if that fails tries it
//!     `False` on the formula as it was before the `True` attempt.
//!
//! Because every branch owns its copy, a failed branch cannot leak partial
//! assignments into its sibling. Depth is bounded by the number of
//! variables, so the search terminates on every finite formula.

use crate::sat::cnf::Formula;
use crate::sat::configs::SolverConfig;
use crate::sat::simplify::simplify;
use crate::sat::solver::{SolutionStats, SolveResult, Solver};
use log::{debug, trace};

/// Represents a complete backtracking solver.
#[derive(Debug, Clone)]
pub struct Dpll {
    /// The input formula. Never mutated; every branch works on a copy.
    pub formula: Formula,
    stats: SolutionStats,
}

impl Solver for Dpll {
    fn new(formula: Formula, _config: &SolverConfig) -> Self {
        Self {
            formula,
            stats: SolutionStats::default(),
        }
    }

    /// Attempts to find a model.
    ///
    /// # Returns
    ///
    /// * `SolveResult::Satisfiable`: the assignment of the branch that emptied
    ///   the clause set. Variables that became irrelevant may still be `Unknown`.
    /// * `SolveResult::Unsatisfiable`: every branch derived the empty clause.
    fn solve(&mut self) -> SolveResult {
        self.stats = SolutionStats::default();
        match self.search(self.formula.clone(), 0) {
            Some(model) => SolveResult::Satisfiable(model.into_assignment()),
            None => SolveResult::Unsatisfiable,
        }
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl Dpll {
    /// One node of the search tree. `formula` is this node's private copy.
    fn search(&mut self, mut formula: Formula, depth: usize) -> Option<Formula> {
        self.stats.simplify_rounds += simplify(&mut formula);

        if formula.is_empty() {
            debug!("depth {depth}: clause set emptied, model found");
            return Some(formula);
        }

        if formula.bottom() {
            trace!("depth {depth}: derived the empty clause");
            self.stats.conflicts += 1;
            return None;
        }

        // remaining clauses only hold Unknown literals, so a blank exists
        let var = formula.assignment().first_blank()?;
        self.stats.decisions += 1;

        debug!("depth {depth}: branching on {var} = true");
        let mut true_branch = formula.clone();
        true_branch.assign(var.positive(), true);
        if let Some(model) = self.search(true_branch, depth + 1) {
            return Some(model);
        }

        debug!("depth {depth}: backtracking, {var} = false");
        formula.assign(var.positive(), false);
        self.search(formula, depth + 1)
    }
}
