//! Formulas in conjunctive normal form.
//!
//! A `Formula` owns its clause sequence and the single assignment table that
//! every clause is evaluated against. Cloning a formula gives an independent
//! copy of both, which is what the backtracking search relies on.

use crate::sat::assignment::{Assignment, Truth};
use crate::sat::clause::Clause;
use crate::sat::error::FormulaError;
use crate::sat::literal::{Literal, MAX_VARIABLES, Variable};
use itertools::Itertools;
use std::fmt;

/// A conjunction of clauses paired with one assignment table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formula {
    clauses: Vec<Clause>,
    assignment: Assignment,
}

impl Formula {
    /// Builds a formula over variables `x0..x(num_vars-1)`, all `Unknown`.
    ///
    /// # Errors
    ///
    /// - `FormulaError::TooManyVariables` if `num_vars` exceeds
    ///   `MAX_VARIABLES` or the table cannot be allocated.
    /// - `FormulaError::UnknownVariable` if a clause mentions a variable
    ///   outside that range.
    pub fn new(num_vars: usize, clauses: Vec<Clause>) -> Result<Self, FormulaError> {
        if num_vars > MAX_VARIABLES {
            return Err(FormulaError::TooManyVariables { num_vars });
        }
        let assignment = Assignment::try_new(num_vars)
            .map_err(|_| FormulaError::TooManyVariables { num_vars })?;
        for (i, clause) in clauses.iter().enumerate() {
            if let Some(lit) = clause.iter().find(|lit| !assignment.contains(lit.variable())) {
                return Err(FormulaError::UnknownVariable {
                    variable: lit.variable(),
                    clause: i,
                });
            }
        }
        Ok(Self {
            clauses,
            assignment,
        })
    }

    /// Builds a formula whose clauses are known to stay within `num_vars`.
    pub(crate) fn from_parts(num_vars: usize, clauses: Vec<Clause>) -> Self {
        debug_assert!(clauses
            .iter()
            .flatten()
            .all(|lit| lit.variable().index() < num_vars));
        Self {
            clauses,
            assignment: Assignment::new(num_vars),
        }
    }

    /// Builds a formula from DIMACS-numbered clauses, sizing the variable set
    /// to the largest variable mentioned.
    ///
    /// # Errors
    ///
    /// `FormulaError::ZeroLiteral` if a clause contains `0`, and
    /// `FormulaError::TooManyVariables` as for [`Formula::new`].
    pub fn from_dimacs_clauses(clauses: Vec<Vec<i32>>) -> Result<Self, FormulaError> {
        let num_vars = clauses
            .iter()
            .flatten()
            .map(|l| l.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);
        Self::from_dimacs_with_vars(num_vars, clauses)
    }

    pub(crate) fn from_dimacs_with_vars(
        num_vars: usize,
        clauses: Vec<Vec<i32>>,
    ) -> Result<Self, FormulaError> {
        let clauses = clauses
            .into_iter()
            .enumerate()
            .map(|(i, c)| {
                c.into_iter()
                    .map(|l| Literal::from_dimacs(l).ok_or(FormulaError::ZeroLiteral { clause: i }))
                    .collect::<Result<Clause, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(num_vars, clauses)
    }

    /// The remaining clauses, in order.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// The shared assignment table.
    #[must_use]
    pub const fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Mutable access to the assignment table.
    pub fn assignment_mut(&mut self) -> &mut Assignment {
        &mut self.assignment
    }

    /// Consumes the formula, keeping only its assignment.
    #[must_use]
    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }

    /// Number of declared variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.assignment.num_vars()
    }

    /// Number of remaining clauses.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Whether no clause remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Sets `lit`'s variable so that `lit` evaluates to `value`.
    pub fn assign(&mut self, lit: Literal, value: bool) {
        self.assignment.assign(lit, value);
    }

    /// Evaluates the clause at `index` under the current assignment.
    #[must_use]
    pub fn eval_clause(&self, index: usize) -> Truth {
        self.clauses[index].evaluate(&self.assignment)
    }

    /// `true` iff every clause is `True` under the current assignment.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.clauses
            .iter()
            .all(|c| c.evaluate(&self.assignment).is_true())
    }

    /// `true` iff some clause has been reduced to the empty clause.
    #[must_use]
    pub fn bottom(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// Variables still `Unknown`, in table order.
    #[must_use]
    pub fn blank_variables(&self) -> Vec<Variable> {
        self.assignment.blank_variables()
    }

    /// Checks a model against this formula's clauses: each must contain a
    /// literal that is `True` under `model`.
    #[must_use]
    pub fn verify(&self, model: &Assignment) -> bool {
        model.num_vars() == self.num_vars()
            && self
                .clauses
                .iter()
                .all(|c| c.iter().any(|&lit| model.literal_value(lit).is_true()))
    }

    /// Index of the first clause that is not `True`.
    #[must_use]
    pub fn first_unsatisfied(&self) -> Option<usize> {
        self.clauses
            .iter()
            .position(|c| !c.evaluate(&self.assignment).is_true())
    }

    /// Drops every clause for which `remove` returns `true`. Returns whether
    /// anything was dropped.
    pub(crate) fn remove_clauses_where(
        &mut self,
        mut remove: impl FnMut(&Clause, &Assignment) -> bool,
    ) -> bool {
        let before = self.clauses.len();
        let assignment = &self.assignment;
        self.clauses.retain(|c| !remove(c, assignment));
        self.clauses.len() != before
    }

    /// Applies `Clause::reduce` to every clause. Returns whether any literal
    /// was removed.
    pub(crate) fn reduce_clauses(&mut self) -> bool {
        let assignment = &self.assignment;
        self.clauses
            .iter_mut()
            .fold(false, |changed, c| c.reduce(assignment) | changed)
    }

    /// Renders the clause set as DIMACS text.
    #[must_use]
    pub fn to_dimacs(&self) -> String {
        let mut out = format!("p cnf {} {}\n", self.num_vars(), self.num_clauses());
        for clause in &self.clauses {
            for lit in clause {
                out.push_str(&lit.to_dimacs().to_string());
                out.push(' ');
            }
            out.push_str("0\n");
        }
        out
    }
}

/// Renders the clauses joined by `∧`, or `[]` when none remain.
impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            f.write_str("[]")
        } else {
            write!(f, "{}", self.clauses.iter().join(" ∧ "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_undeclared_variable() {
        let clauses = vec![Clause::new([Variable::new(0).positive()]), Clause::new([Variable::new(5).negative()])];
        assert_eq!(
            Formula::new(2, clauses),
            Err(FormulaError::UnknownVariable {
                variable: Variable::new(5),
                clause: 1,
            })
        );
    }

    #[test]
    fn test_from_dimacs_clauses_sizes_variable_set() {
        let f = Formula::from_dimacs_clauses(vec![vec![1, -3], vec![2]]).unwrap();
        assert_eq!(f.num_vars(), 3);
        assert_eq!(f.num_clauses(), 2);
        assert_eq!(f.assignment().num_unknown(), 3);
    }

    #[test]
    fn test_oversized_variable_set_rejected() {
        assert_eq!(
            Formula::from_dimacs_clauses(vec![vec![i32::MIN]]),
            Err(FormulaError::TooManyVariables {
                num_vars: MAX_VARIABLES + 1,
            })
        );
        assert_eq!(
            Formula::new(usize::MAX, Vec::new()),
            Err(FormulaError::TooManyVariables { num_vars: usize::MAX })
        );
    }

    #[test]
    fn test_zero_literal_rejected() {
        assert_eq!(
            Formula::from_dimacs_clauses(vec![vec![1, 0, 2]]),
            Err(FormulaError::ZeroLiteral { clause: 0 })
        );
    }

    #[test]
    fn test_bottom_on_empty_clause() {
        let f = Formula::from_dimacs_clauses(vec![vec![]]).unwrap();
        assert!(f.bottom());
        assert!(!f.is_satisfied());
    }

    #[test]
    fn test_is_satisfied_requires_all_true() {
        let mut f = Formula::from_dimacs_clauses(vec![vec![1, 2], vec![-1]]).unwrap();
        assert!(!f.is_satisfied());
        f.assign(Variable::new(0).positive(), false);
        assert!(!f.is_satisfied());
        f.assign(Variable::new(1).positive(), true);
        assert!(f.is_satisfied());
        assert_eq!(f.first_unsatisfied(), None);
    }

    #[test]
    fn test_empty_formula_is_satisfied() {
        let f = Formula::new(2, Vec::new()).unwrap();
        assert!(f.is_satisfied());
        assert!(!f.bottom());
    }

    #[test]
    fn test_verify_model() {
        let f = Formula::from_dimacs_clauses(vec![vec![1, 2], vec![-1]]).unwrap();
        let mut model = Assignment::new(2);
        model.assign(Variable::new(0).positive(), false);
        assert!(!f.verify(&model));
        model.assign(Variable::new(1).positive(), true);
        assert!(f.verify(&model));
    }

    #[test]
    fn test_display_and_dimacs() {
        let f = Formula::from_dimacs_clauses(vec![vec![1, -2], vec![2]]).unwrap();
        assert_eq!(f.to_string(), "( x₀ ∨ ¬x₁ ) ∧ ( x₁ )");
        assert_eq!(f.to_dimacs(), "p cnf 2 2\n1 -2 0\n2 0\n");
        assert_eq!(Formula::default().to_string(), "[]");
    }
}
