#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Variables and literals.
//!
//! A `Variable` is a dense index into a formula's assignment table. A
//! `Literal` pairs a variable with a polarity; two literals over the same
//! variable with opposite polarities are complements of each other.

use core::ops::{Neg, Not};
use std::fmt;

/// Largest number of variables a formula may declare. DIMACS numbers
/// variables with positive `i32`s, so `x0..x(MAX_VARIABLES - 1)` is exactly
/// the range it can express.
pub const MAX_VARIABLES: usize = i32::MAX as usize;

/// Opaque handle for a boolean variable, displayed as `x<index>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Variable(u32);

impl Variable {
    /// Creates the variable with the given table index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of this variable in the assignment table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The positive literal over this variable.
    #[must_use]
    pub const fn positive(self) -> Literal {
        Literal::new(self, true)
    }

    /// The negated literal over this variable.
    #[must_use]
    pub const fn negative(self) -> Literal {
        Literal::new(self, false)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A variable together with a polarity.
///
/// `polarity == true` is the plain variable, `false` its negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Literal {
    variable: Variable,
    polarity: bool,
}

impl Literal {
    /// Builds a literal from its parts.
    #[must_use]
    pub const fn new(variable: Variable, polarity: bool) -> Self {
        Self { variable, polarity }
    }

    /// The underlying variable.
    #[must_use]
    pub const fn variable(self) -> Variable {
        self.variable
    }

    /// `true` for a plain variable, `false` for a negated one.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.polarity
    }

    /// Whether this literal carries the negation marker.
    #[must_use]
    pub const fn is_negated(self) -> bool {
        !self.polarity
    }

    /// The complementary literal. Negating twice gives back `self`.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self {
            variable: self.variable,
            polarity: !self.polarity,
        }
    }

    /// Converts a non-zero DIMACS integer into a literal.
    ///
    /// DIMACS numbers variables from 1, so `k` maps to `x(k-1)`. Returns
    /// `None` for `0`, which DIMACS reserves as the clause terminator.
    #[must_use]
    pub fn from_dimacs(value: i32) -> Option<Self> {
        if value == 0 {
            return None;
        }
        let variable = Variable::new(value.unsigned_abs() - 1);
        Some(Self::new(variable, value.is_positive()))
    }

    /// The DIMACS integer for this literal. Widened to `i64` so that every
    /// variable index has a representation.
    #[must_use]
    pub fn to_dimacs(self) -> i64 {
        let value = i64::from(self.variable.0) + 1;
        if self.polarity { value } else { -value }
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl From<Variable> for Literal {
    fn from(variable: Variable) -> Self {
        variable.positive()
    }
}

const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// Renders `x₀` or `¬x₀`.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negated() {
            f.write_str("¬")?;
        }
        f.write_str("x")?;
        for digit in self.variable.0.to_string().bytes() {
            write!(f, "{}", SUBSCRIPTS[usize::from(digit - b'0')])?;
        }
        Ok(())
    }
}
