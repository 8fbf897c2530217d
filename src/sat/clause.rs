//! Disjunctive clauses.

use crate::sat::assignment::{Assignment, Truth};
use crate::sat::literal::Literal;
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

/// An ordered disjunction of literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: SmallVec<[Literal; 8]>,
}

impl Clause {
    /// Creates a clause from its literals, keeping their order.
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: literals.into_iter().collect(),
        }
    }

    /// Number of literals left in the clause.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// An empty clause is the derived contradiction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Exactly one literal.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// Contains some literal together with its complement.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .tuple_combinations()
            .any(|(&a, &b)| a == b.negated())
    }

    /// Whether `lit` occurs in the clause.
    #[must_use]
    pub fn contains(&self, lit: Literal) -> bool {
        self.literals.contains(&lit)
    }

    /// The literals in clause order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// The literals as a slice.
    #[must_use]
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Evaluates the clause under `assignment`.
    ///
    /// - the empty clause is `False`;
    /// - any `True` literal makes the clause `True`;
    /// - otherwise the clause is `False` only once the whole assignment is
    ///   total, and `Unknown` before that.
    #[must_use]
    pub fn evaluate(&self, assignment: &Assignment) -> Truth {
        if self.is_empty() {
            return Truth::False;
        }
        if self
            .iter()
            .any(|&lit| assignment.literal_value(lit).is_true())
        {
            return Truth::True;
        }
        if assignment.is_total() {
            Truth::False
        } else {
            Truth::Unknown
        }
    }

    /// Removes every literal that is `False` under `assignment`. Returns
    /// whether anything was removed.
    pub fn reduce(&mut self, assignment: &Assignment) -> bool {
        let before = self.literals.len();
        self.literals
            .retain(|lit| !assignment.literal_value(*lit).is_false());
        self.literals.len() != before
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl From<Vec<Literal>> for Clause {
    fn from(literals: Vec<Literal>) -> Self {
        Self::new(literals)
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

/// Renders `( x₀ ∨ ¬x₁ )`.
impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "( {} )", self.iter().join(" ∨ "))
    }
}
