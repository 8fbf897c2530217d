//! Incomplete stochastic local search in the style of WalkSAT.
//!
//! Each restart draws a uniformly random total assignment. While some clause
//! is false and the restart still has flip budget, the solver looks at the
//! first false clause and:
//!
//! 1. flips a *freebie* literal if one exists, that is a literal whose flip
//!    turns no currently true clause false. Freebies cost no budget: each one
//!    satisfies the chosen clause without breaking another, so the number of
//!    true clauses strictly grows and freebie chains are finite;
//! 2. otherwise tosses a coin that lands `true` with probability `bias`. On
//!    `true` it flips the literal breaking the fewest true clauses (first one
//!    on ties), on `false` a uniformly random literal of the clause. Either
//!    way one unit of the flip budget is spent.
//!
//! **The search is incomplete.** `SolveResult::Exhausted` only means no model
//! was found within the budget; the formula may still be satisfiable.

use crate::sat::cnf::Formula;
use crate::sat::configs::{SolverConfig, WalkSatConfig};
use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::{SolutionStats, SolveResult, Solver};
use log::{debug, info, trace};

/// Local-search solver. Mutates one assignment in place across all flips and
/// restarts.
#[derive(Debug, Clone)]
pub struct WalkSat {
    formula: Formula,
    config: WalkSatConfig,
    rng: fastrand::Rng,
    /// For each variable, the clauses mentioning it.
    occurrences: Vec<Vec<usize>>,
    stats: SolutionStats,
}

impl Solver for WalkSat {
    fn new(formula: Formula, config: &SolverConfig) -> Self {
        let mut occurrences = vec![Vec::new(); formula.num_vars()];
        for (i, clause) in formula.clauses().iter().enumerate() {
            for lit in clause {
                let list: &mut Vec<usize> = &mut occurrences[lit.variable().index()];
                if list.last() != Some(&i) {
                    list.push(i);
                }
            }
        }

        Self {
            rng: config.walksat.rng(),
            config: config.walksat,
            formula,
            occurrences,
            stats: SolutionStats::default(),
        }
    }

    fn solve(&mut self) -> SolveResult {
        self.stats = SolutionStats::default();

        if self.formula.bottom() {
            info!("input contains the empty clause, no assignment can satisfy it");
            return SolveResult::Unsatisfiable;
        }

        while !self.formula.is_satisfied() && self.stats.restarts < self.config.restart_budget {
            self.stats.restarts += 1;
            self.formula.assignment_mut().randomize(&mut self.rng);
            debug!(
                "restart {}: {}",
                self.stats.restarts,
                self.formula.assignment()
            );
            self.walk();
        }

        if self.formula.is_satisfied() {
            SolveResult::Satisfiable(self.formula.assignment().clone())
        } else {
            info!(
                "no model after {} restarts of {} flips",
                self.stats.restarts, self.config.flip_budget
            );
            SolveResult::Exhausted
        }
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl WalkSat {
    /// The formula with its current assignment.
    #[must_use]
    pub const fn formula(&self) -> &Formula {
        &self.formula
    }

    /// The inner flip loop of one restart.
    fn walk(&mut self) {
        let mut flips = 0;
        while flips < self.config.flip_budget {
            let Some(clause_index) = self.formula.first_unsatisfied() else {
                return;
            };

            let literals: Vec<Literal> = self.formula.clauses()[clause_index]
                .iter()
                .copied()
                .collect();
            let breaks: Vec<usize> = literals
                .iter()
                .map(|lit| self.break_count(lit.variable()))
                .collect();

            if let Some(pos) = breaks.iter().position(|&b| b == 0) {
                trace!("freebie flip of {}", literals[pos]);
                self.stats.freebies += 1;
                self.flip(literals[pos].variable());
                continue;
            }

            flips += 1;
            self.stats.flips += 1;
            let pick = if self.rng.f64() < self.config.bias {
                // min_by_key keeps the first of equal minima
                let pos = breaks
                    .iter()
                    .enumerate()
                    .min_by_key(|&(_, b)| b)
                    .map_or(0, |(i, _)| i);
                trace!("greedy flip of {} breaking {}", literals[pos], breaks[pos]);
                pos
            } else {
                let pos = self.rng.usize(..literals.len());
                trace!("random flip of {}", literals[pos]);
                pos
            };
            self.flip(literals[pick].variable());
        }
    }

    fn flip(&mut self, var: Variable) {
        self.formula.assignment_mut().flip(var);
    }

    /// Number of currently true clauses that flipping `var` would make false.
    fn break_count(&mut self, var: Variable) -> usize {
        let occurrences = &self.occurrences[var.index()];
        let before: Vec<bool> = occurrences
            .iter()
            .map(|&i| self.formula.eval_clause(i).is_true())
            .collect();

        self.formula.assignment_mut().flip(var);
        let broken = occurrences
            .iter()
            .zip(&before)
            .filter(|&(&i, &was_true)| was_true && !self.formula.eval_clause(i).is_true())
            .count();
        self.formula.assignment_mut().flip(var);

        broken
    }
}
