//! Random k-CNF formulas, for tests, benchmarks and the `random` command.

use crate::sat::clause::Clause;
use crate::sat::cnf::Formula;
use crate::sat::error::GeneratorError;
use crate::sat::literal::{Literal, MAX_VARIABLES, Variable};

/// Generates `num_clauses` clauses over `num_vars` variables.
///
/// Each clause draws `k` distinct variables uniformly and gives each a fair
/// random polarity. All variables start `Unknown`.
///
/// # Errors
///
/// - `GeneratorError::TooManyVariables` when `num_vars > MAX_VARIABLES`.
/// - `GeneratorError::ClauseTooWide` when `k > num_vars`.
pub fn generate(
    k: usize,
    num_vars: usize,
    num_clauses: usize,
    rng: &mut fastrand::Rng,
) -> Result<Formula, GeneratorError> {
    if num_vars > MAX_VARIABLES {
        return Err(GeneratorError::TooManyVariables { num_vars });
    }
    if k > num_vars {
        return Err(GeneratorError::ClauseTooWide { k, num_vars });
    }

    let pool: Vec<Variable> = (0..num_vars)
        .map(|i| Variable::new(u32::try_from(i).unwrap_or(u32::MAX)))
        .collect();

    let clauses = (0..num_clauses)
        .map(|_| {
            rng.choose_multiple(pool.iter().copied(), k)
                .into_iter()
                .map(|var| Literal::new(var, rng.bool()))
                .collect::<Clause>()
        })
        .collect();

    Ok(Formula::from_parts(num_vars, clauses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_shape() {
        let mut rng = fastrand::Rng::with_seed(1);
        let f = generate(3, 5, 12, &mut rng).unwrap();
        assert_eq!(f.num_vars(), 5);
        assert_eq!(f.num_clauses(), 12);
        assert_eq!(f.assignment().num_unknown(), 5);
        for clause in f.clauses() {
            assert_eq!(clause.len(), 3);
            assert!(clause.iter().map(|l| l.variable()).all_unique());
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate(2, 4, 6, &mut fastrand::Rng::with_seed(9)).unwrap();
        let b = generate(2, 4, 6, &mut fastrand::Rng::with_seed(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_clause_too_wide() {
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(
            generate(4, 3, 1, &mut rng),
            Err(GeneratorError::ClauseTooWide { k: 4, num_vars: 3 })
        );
        assert_eq!(
            generate(3, MAX_VARIABLES + 1, 1, &mut rng),
            Err(GeneratorError::TooManyVariables {
                num_vars: MAX_VARIABLES + 1
            })
        );
    }
}
