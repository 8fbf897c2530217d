//! Solver selection and tuning parameters.

use crate::sat::error::SolveError;
use std::fmt;
use std::str::FromStr;

/// Default flips per restart.
pub const DEFAULT_FLIP_BUDGET: usize = 4;
/// Default number of restarts.
pub const DEFAULT_RESTART_BUDGET: usize = 4;
/// Default probability of a greedy flip over a random one.
pub const DEFAULT_BIAS: f64 = 0.6;

/// Parameters of the local search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkSatConfig {
    /// Coin-toss flips allowed per restart. Freebie flips are not counted.
    pub flip_budget: usize,
    /// Random restarts allowed.
    pub restart_budget: usize,
    /// Probability in `[0, 1]` of taking the greedy flip.
    pub bias: f64,
    /// Seed for reproducible runs; `None` seeds from the environment.
    pub seed: Option<u64>,
}

impl Default for WalkSatConfig {
    fn default() -> Self {
        Self {
            flip_budget: DEFAULT_FLIP_BUDGET,
            restart_budget: DEFAULT_RESTART_BUDGET,
            bias: DEFAULT_BIAS,
            seed: None,
        }
    }
}

impl WalkSatConfig {
    /// Checks that `bias` is a probability.
    ///
    /// # Errors
    ///
    /// `SolveError::InvalidConfiguration` if `bias` is NaN or outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), SolveError> {
        if (0.0..=1.0).contains(&self.bias) {
            Ok(())
        } else {
            Err(SolveError::InvalidConfiguration(format!(
                "bias must lie in [0, 1], got {}",
                self.bias
            )))
        }
    }

    /// The random generator for one run.
    #[must_use]
    pub fn rng(&self) -> fastrand::Rng {
        self.seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
    }
}

/// Everything the dispatcher forwards to a solver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolverConfig {
    /// Used by the incomplete solver only.
    pub walksat: WalkSatConfig,
}

/// The available strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolverType {
    /// Backtracking search with simplification. Sound and complete.
    #[default]
    Complete,
    /// Stochastic local search. May miss existing models.
    Incomplete,
}

impl FromStr for SolverType {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "complete" | "dpll" => Ok(Self::Complete),
            "incomplete" | "walksat" => Ok(Self::Incomplete),
            _ => Err(SolveError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for SolverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Incomplete => write!(f, "incomplete"),
        }
    }
}
