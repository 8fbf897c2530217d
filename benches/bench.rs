use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use tristate_sat::sat::cnf::Formula;
use tristate_sat::sat::configs::{SolverConfig, WalkSatConfig};
use tristate_sat::sat::dpll::Dpll;
use tristate_sat::sat::generator::generate;
use tristate_sat::sat::simplify::simplify;
use tristate_sat::sat::solver::Solver;
use tristate_sat::sat::walksat::WalkSat;

/// Random 3-CNF instances near the satisfiability threshold.
fn instances(num_vars: usize, count: usize) -> Vec<Formula> {
    let mut rng = fastrand::Rng::with_seed(42);
    let num_clauses = num_vars * 43 / 10;
    (0..count)
        .filter_map(|_| generate(3, num_vars, num_clauses, &mut rng).ok())
        .collect()
}

fn solve_all<S: Solver>(formulas: &[Formula], config: &SolverConfig) {
    for formula in formulas {
        let mut solver = S::new(formula.clone(), config);
        black_box(solver.solve());
    }
}

fn bench_simplify(c: &mut Criterion) {
    let formulas = instances(40, 20);
    c.bench_function("simplify - 3sat 40 vars", |b| {
        b.iter(|| {
            for formula in &formulas {
                let mut f = formula.clone();
                black_box(simplify(&mut f));
            }
        });
    });
}

fn bench_complete(c: &mut Criterion) {
    let mut group = c.benchmark_group("complete - 3sat");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    for num_vars in [10, 20, 30] {
        let formulas = instances(num_vars, 10);
        group.bench_function(format!("{num_vars} vars"), |b| {
            b.iter(|| solve_all::<Dpll>(&formulas, &SolverConfig::default()));
        });
    }
    group.finish();
}

fn bench_incomplete(c: &mut Criterion) {
    let mut group = c.benchmark_group("incomplete - bias");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    let formulas = instances(30, 10);
    for bias in [0.0, 0.3, 0.6, 0.9] {
        let config = SolverConfig {
            walksat: WalkSatConfig {
                flip_budget: 200,
                restart_budget: 10,
                bias,
                seed: Some(7),
            },
        };
        group.bench_function(format!("bias {bias}"), |b| {
            b.iter(|| solve_all::<WalkSat>(&formulas, &config));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_simplify, bench_complete, bench_incomplete);
criterion_main!(benches);
