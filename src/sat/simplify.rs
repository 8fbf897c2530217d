//! Fixed-point simplification: pure literals, unit clauses and reduction.
//!
//! One round forces every pure literal, then every unit literal, then
//! drops satisfied clauses and falsified literals. Rounds repeat until one
//! changes nothing or no clause is left.
//!
//! Within a round a variable is never reassigned: pure literals are applied
//! first, and a unit literal whose variable is already decided is skipped.
//! If that unit was falsified by the earlier decision, the reduction step
//! empties its clause and the formula reports `bottom`.

use crate::sat::cnf::Formula;
use crate::sat::literal::Literal;
use bit_vec::BitVec;
use log::{debug, trace};

/// Literals whose variable is `Unknown` and whose complement occurs in no
/// remaining clause, in assignment-table order.
///
/// A variable that occurs in no clause at all counts as pure positive.
#[must_use]
pub fn monochromes(formula: &Formula) -> Vec<Literal> {
    let num_vars = formula.num_vars();
    let mut seen_positive = BitVec::from_elem(num_vars, false);
    let mut seen_negative = BitVec::from_elem(num_vars, false);

    for lit in formula.clauses().iter().flat_map(|c| c.iter()) {
        let seen = if lit.polarity() {
            &mut seen_positive
        } else {
            &mut seen_negative
        };
        seen.set(lit.variable().index(), true);
    }

    formula
        .blank_variables()
        .into_iter()
        .filter_map(|var| {
            let i = var.index();
            match (seen_positive[i], seen_negative[i]) {
                (_, false) => Some(var.positive()),
                (false, true) => Some(var.negative()),
                (true, true) => None,
            }
        })
        .collect()
}

/// The single literal of every unit clause, in clause order.
#[must_use]
pub fn unit_literals(formula: &Formula) -> Vec<Literal> {
    formula
        .clauses()
        .iter()
        .filter(|c| c.is_unit())
        .map(|c| c[0])
        .collect()
}

/// Removes every clause that is `True`, then strips `False` literals from
/// the survivors. Returns whether the clause set changed.
pub fn reduce_formula(formula: &mut Formula) -> bool {
    let removed = formula.remove_clauses_where(|c, a| c.evaluate(a).is_true());
    let shrunk = formula.reduce_clauses();
    removed | shrunk
}

/// Forces each literal to `True` unless its variable is already decided.
/// Returns how many variables were assigned.
fn force(formula: &mut Formula, literals: &[Literal], rule: &str) -> usize {
    let mut forced = 0;
    for &lit in literals {
        if formula.assignment().value(lit.variable()).is_known() {
            continue;
        }
        trace!("{rule}: forcing {lit}");
        formula.assign(lit, true);
        forced += 1;
    }
    forced
}

/// Runs simplification rounds until a fixed point or an empty clause set.
/// Returns the number of rounds executed; an already empty clause set takes
/// none, so variables it no longer mentions stay `Unknown`.
///
/// Every productive round assigns a variable, removes a clause or removes a
/// literal, so the loop ends after finitely many rounds.
pub fn simplify(formula: &mut Formula) -> usize {
    let mut rounds = 0;
    while !formula.is_empty() {
        rounds += 1;

        let pures = monochromes(formula);
        let forced_pure = force(formula, &pures, "pure literal");

        let units = unit_literals(formula);
        let forced_unit = force(formula, &units, "unit clause");

        let reduced = reduce_formula(formula);

        debug!(
            "simplify round {rounds}: {forced_pure} pure, {forced_unit} unit, {} clauses left",
            formula.num_clauses()
        );

        if forced_pure == 0 && forced_unit == 0 && !reduced {
            break;
        }
    }
    rounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::Truth;
    use crate::sat::clause::Clause;
    use crate::sat::literal::Variable;

    fn formula(clauses: Vec<Vec<i32>>) -> Formula {
        Formula::from_dimacs_clauses(clauses).unwrap()
    }

    fn x(i: u32) -> Variable {
        Variable::new(i)
    }

    #[test]
    fn test_monochromes() {
        // x0 mixed, x1 pure positive, x2 pure negative
        let f = formula(vec![vec![1, 2], vec![-1, -3], vec![1, -3]]);
        assert_eq!(monochromes(&f), vec![x(1).positive(), x(2).negative()]);
    }

    #[test]
    fn test_monochromes_skip_decided_variables() {
        let mut f = formula(vec![vec![1, 2]]);
        f.assign(x(0).positive(), false);
        assert_eq!(monochromes(&f), vec![x(1).positive()]);
    }

    #[test]
    fn test_unmentioned_variable_is_pure_positive() {
        // x2 is declared but occurs in no clause
        let clauses = vec![
            Clause::new([x(0).positive(), x(1).negative()]),
            Clause::new([x(0).negative(), x(1).positive()]),
        ];
        let mut f = Formula::new(3, clauses).unwrap();
        assert_eq!(monochromes(&f), vec![x(2).positive()]);

        assert_eq!(simplify(&mut f), 2);
        assert_eq!(f.assignment().value(x(2)), Truth::True);
        assert_eq!(f.assignment().value(x(0)), Truth::Unknown);
        assert_eq!(f.num_clauses(), 2);
    }

    #[test]
    fn test_empty_formula_takes_no_rounds() {
        let mut f = Formula::new(2, Vec::new()).unwrap();
        assert_eq!(simplify(&mut f), 0);
        assert_eq!(f.assignment().num_unknown(), 2);
    }

    #[test]
    fn test_unit_literals() {
        let f = formula(vec![vec![1], vec![1, 2], vec![-2]]);
        assert_eq!(unit_literals(&f), vec![x(0).positive(), x(1).negative()]);
    }

    #[test]
    fn test_reduce_formula() {
        let mut f = formula(vec![vec![1, 2], vec![-1, 3], vec![2, 3]]);
        f.assign(x(0).positive(), true);
        assert!(reduce_formula(&mut f));
        assert_eq!(f, {
            let mut expected = formula(vec![vec![3], vec![2, 3]]);
            expected.assign(x(0).positive(), true);
            expected
        });
        assert!(!reduce_formula(&mut f));
    }

    #[test]
    fn test_single_unit_clause_simplifies_away() {
        let mut f = formula(vec![vec![1]]);
        simplify(&mut f);
        assert!(f.is_empty());
        assert_eq!(f.assignment().value(x(0)), Truth::True);
    }

    #[test]
    fn test_scenario_resolves_without_branching() {
        let mut f = formula(vec![vec![1, 2], vec![-1]]);
        simplify(&mut f);
        assert!(f.is_empty());
        assert_eq!(f.assignment().value(x(0)), Truth::False);
        assert_eq!(f.assignment().value(x(1)), Truth::True);
    }

    #[test]
    fn test_conflicting_units_derive_bottom() {
        let mut f = formula(vec![vec![1], vec![-1]]);
        simplify(&mut f);
        assert!(f.bottom());
        // first unit wins, the other clause empties
        assert_eq!(f.assignment().value(x(0)), Truth::True);
    }

    #[test]
    fn test_simplify_is_idempotent() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..50 {
            let mut f = crate::sat::generator::generate(3, 6, 10, &mut rng).unwrap();
            simplify(&mut f);
            let fixed = f.clone();
            assert!(simplify(&mut f) <= 1);
            assert_eq!(f, fixed);
        }
    }

    #[test]
    fn test_simplify_never_reassigns() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..50 {
            let mut f = crate::sat::generator::generate(2, 5, 12, &mut rng).unwrap();
            f.assign(x(0).positive(), true);
            simplify(&mut f);
            assert_eq!(f.assignment().value(x(0)), Truth::True);
        }
    }
}
