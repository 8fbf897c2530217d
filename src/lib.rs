#![deny(missing_docs)]
//! Satisfiability of propositional formulas in conjunctive normal form.
//!
//! Two strategies share one three-valued formula model:
//! - a complete backtracking search with pure-literal and unit-clause
//!   simplification ([`sat::dpll`]), which either finds a model or proves
//!   that none exists;
//! - an incomplete WalkSAT-style local search ([`sat::walksat`]), which is
//!   often fast but may report [`sat::solver::SolveResult::Exhausted`] on a
//!   satisfiable formula.
//!
//! [`sat::solver::solve`] selects a strategy by name.

/// The `sat` module holds the formula model, the simplifier and both solvers.
pub mod sat;
