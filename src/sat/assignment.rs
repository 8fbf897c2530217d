//! Three-valued variable assignments.
//!
//! Every variable of a formula has an entry in the table from construction
//! onwards; only the stored `Truth` changes. The number of `Unknown` entries
//! is tracked so that totality can be checked without a scan.

use crate::sat::literal::{Literal, Variable};
use core::ops::{Index, Not};
use std::collections::TryReserveError;
use std::fmt;

/// A truth value in three-valued logic.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum Truth {
    /// Definitely true.
    True,
    /// Definitely false.
    False,
    /// Not decided yet.
    #[default]
    Unknown,
}

impl Truth {
    /// Whether a definite value has been chosen.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Whether this is `Unknown`.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Whether this is `True`.
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    /// Whether this is `False`.
    #[must_use]
    pub const fn is_false(self) -> bool {
        matches!(self, Self::False)
    }

    /// The definite value, if any.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unknown => None,
        }
    }
}

impl From<bool> for Truth {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl Not for Truth {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Unknown => Self::Unknown,
        }
    }
}

/// The assignment table of a formula, indexed by `Variable`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    values: Vec<Truth>,
    unknown: usize,
}

impl Index<Variable> for Assignment {
    type Output = Truth;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.values[index.index()]
    }
}

impl Assignment {
    /// A table of `num_vars` variables, all `Unknown`.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            values: vec![Truth::Unknown; num_vars],
            unknown: num_vars,
        }
    }

    /// Like [`Assignment::new`], but reports a failed allocation instead of
    /// aborting.
    ///
    /// # Errors
    ///
    /// If the table cannot be allocated.
    pub fn try_new(num_vars: usize) -> Result<Self, TryReserveError> {
        let mut values = Vec::new();
        values.try_reserve_exact(num_vars)?;
        values.resize(num_vars, Truth::Unknown);
        Ok(Self {
            values,
            unknown: num_vars,
        })
    }

    /// Number of variables in the table.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.values.len()
    }

    /// Whether `var` has an entry in this table.
    #[must_use]
    pub fn contains(&self, var: Variable) -> bool {
        var.index() < self.values.len()
    }

    /// The stored value of `var`.
    #[must_use]
    pub fn value(&self, var: Variable) -> Truth {
        self[var]
    }

    /// Evaluates `lit`: `Unknown` if its variable is undecided, otherwise the
    /// variable's value, inverted for a negated literal.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Truth {
        let value = self[lit.variable()];
        if lit.is_negated() { !value } else { value }
    }

    /// Sets `lit`'s variable so that `lit` evaluates to `value`.
    ///
    /// Conflicting reassignment is not checked here; callers decide whether a
    /// variable may be overwritten.
    pub fn assign(&mut self, lit: Literal, value: bool) {
        let var_value = if lit.is_negated() { !value } else { value };
        self.set(lit.variable(), Truth::from(var_value));
    }

    /// Stores `value` for `var`, keeping the unknown count in step.
    pub fn set(&mut self, var: Variable, value: Truth) {
        let slot = &mut self.values[var.index()];
        match (slot.is_unknown(), value.is_unknown()) {
            (true, false) => self.unknown -= 1,
            (false, true) => self.unknown += 1,
            _ => {}
        }
        *slot = value;
    }

    /// Toggles a decided variable between `True` and `False`. `Unknown` stays
    /// `Unknown`.
    pub fn flip(&mut self, var: Variable) {
        let slot = &mut self.values[var.index()];
        *slot = !*slot;
    }

    /// Whether no variable is `Unknown`.
    #[must_use]
    pub const fn is_total(&self) -> bool {
        self.unknown == 0
    }

    /// Number of `Unknown` variables.
    #[must_use]
    pub const fn num_unknown(&self) -> usize {
        self.unknown
    }

    /// All `Unknown` variables, in table order.
    #[must_use]
    pub fn blank_variables(&self) -> Vec<Variable> {
        self.iter()
            .filter_map(|(var, value)| value.is_unknown().then_some(var))
            .collect()
    }

    /// The first `Unknown` variable in table order.
    #[must_use]
    pub fn first_blank(&self) -> Option<Variable> {
        self.iter()
            .find_map(|(var, value)| value.is_unknown().then_some(var))
    }

    /// Variables currently set to `True`.
    #[must_use]
    pub fn true_variables(&self) -> Vec<Variable> {
        self.iter()
            .filter_map(|(var, value)| value.is_true().then_some(var))
            .collect()
    }

    /// Replaces every entry with a uniformly random `True` or `False`.
    pub fn randomize(&mut self, rng: &mut fastrand::Rng) {
        for value in &mut self.values {
            *value = Truth::from(rng.bool());
        }
        self.unknown = 0;
    }

    /// `(variable, value)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, Truth)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &value)| (Variable::new(index_to_u32(i)), value))
    }
}

/// Tables built through `Formula` hold at most `MAX_VARIABLES` entries, so
/// every index fits.
#[allow(clippy::cast_possible_truncation)]
const fn index_to_u32(i: usize) -> u32 {
    i as u32
}

/// Renders `{x0: T, x1: F, x2: ?}`.
impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (var, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let mark = match value {
                Truth::True => 'T',
                Truth::False => 'F',
                Truth::Unknown => '?',
            };
            write!(f, "{var}: {mark}")?;
        }
        f.write_str("}")
    }
}
