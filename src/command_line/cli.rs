#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use tristate_sat::sat::cnf::Formula;
use tristate_sat::sat::configs::{
    DEFAULT_BIAS, DEFAULT_FLIP_BUDGET, DEFAULT_RESTART_BUDGET, SolverConfig, SolverType,
    WalkSatConfig,
};
use tristate_sat::sat::dimacs::{parse_file, parse_text};
use tristate_sat::sat::generator::generate;
use tristate_sat::sat::solver::{SolutionStats, SolveResult, solve_with};

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "tristate-sat", version, about = "A CNF SAT solver with complete and local-search strategies")]
pub(crate) struct Cli {
    /// An optional path argument. If provided without a subcommand, it's
    /// treated as the path to a DIMACS .cnf file to solve.
    #[arg()]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute.
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula provided as plain text.
    Text {
        /// Literal CNF input as a string (e.g. "1 -2 0\n2 3 0").
        /// Each line represents a clause, literals are space-separated, and 0 terminates a clause.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate a random k-CNF formula and solve it.
    Random {
        /// Literals per clause.
        #[arg(short, long, default_value_t = 3)]
        k: usize,

        /// Number of variables.
        #[arg(long, default_value_t = 4)]
        vars: usize,

        /// Number of clauses.
        #[arg(long, default_value_t = 12)]
        clauses: usize,

        /// Print the generated formula in DIMACS format before solving.
        #[arg(long, default_value_t = false)]
        export_dimacs: bool,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.cnf` file below a directory.
    Dir {
        /// Directory to walk.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug logging of simplification rounds, branches and flips.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Check a found model against the input formula.
    #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print problem and search statistics after solving.
    #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
    pub(crate) stats: bool,

    /// Print the satisfying assignment if one is found.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Solving method: "complete" (backtracking) or "incomplete" (local search).
    #[arg(long, default_value_t = SolverType::Complete.to_string())]
    pub(crate) solver: String,

    /// Coin-toss flips per restart of the local search.
    #[arg(long, default_value_t = DEFAULT_FLIP_BUDGET)]
    pub(crate) flips: usize,

    /// Restarts of the local search.
    #[arg(long, default_value_t = DEFAULT_RESTART_BUDGET)]
    pub(crate) restarts: usize,

    /// Probability of a greedy rather than random flip.
    #[arg(long, default_value_t = DEFAULT_BIAS)]
    pub(crate) bias: f64,

    /// Seed for the random generator, for reproducible runs.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

impl CommonOptions {
    /// The solver configuration these flags describe.
    pub(crate) const fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            walksat: WalkSatConfig {
                flip_budget: self.flips,
                restart_budget: self.restarts,
                bias: self.bias,
                seed: self.seed,
            },
        }
    }
}

/// Solves a directory of CNF files.
///
/// Iterates over all `.cnf` files below `path` and solves each in turn.
///
/// # Errors
///
/// If `path` is not a directory, or a file cannot be parsed or solved.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Provided path is not a directory: {}", path.display()));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "cnf") {
            log::warn!("Skipping non-CNF file: {}", file_path.display());
            continue;
        }

        solve_path(file_path, common)?;
    }

    Ok(())
}

/// Parses and solves one DIMACS file.
///
/// # Errors
///
/// If the file cannot be parsed or the solver configuration is invalid.
pub(crate) fn solve_path(path: &Path, common: &CommonOptions) -> Result<SolveResult, String> {
    let time = Instant::now();
    let formula = parse_file(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let parse_time = time.elapsed();
    solve_and_report(&formula, common, Some(path), parse_time)
}

/// Parses and solves a formula given as text.
///
/// # Errors
///
/// If the text cannot be parsed or the solver configuration is invalid.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> Result<SolveResult, String> {
    let time = Instant::now();
    let formula = parse_text(input).map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();
    solve_and_report(&formula, common, None, parse_time)
}

/// Generates a random formula and solves it.
///
/// # Errors
///
/// If the generator parameters or the solver configuration are invalid.
pub(crate) fn solve_random(
    k: usize,
    vars: usize,
    clauses: usize,
    export_dimacs: bool,
    common: &CommonOptions,
) -> Result<SolveResult, String> {
    let time = Instant::now();
    let mut rng = common.solver_config().walksat.rng();
    let formula = generate(k, vars, clauses, &mut rng).map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();

    println!("Formula: {formula}");
    if export_dimacs {
        println!("DIMACS:\n{}", formula.to_dimacs());
    }

    solve_and_report(&formula, common, None, parse_time)
}

/// Checks a model against the formula and prints the verdict.
///
/// # Errors
///
/// If the model does not satisfy the formula.
pub(crate) fn verify_solution(formula: &Formula, result: &SolveResult) -> Result<(), String> {
    if let Some(model) = result.model() {
        let ok = formula.verify(model);
        println!("Verified: {ok:?}");
        if !ok {
            return Err("Solution failed verification!".to_string());
        }
    }
    Ok(())
}

/// Allocated and resident memory in MiB, if jemalloc statistics are readable.
fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().ok()?.read().ok()?;
    let resident = stats::resident::mib().ok()?.read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

/// Solves a formula with the configured method, then verifies and reports.
///
/// # Errors
///
/// If the method name or configuration is invalid, or verification fails.
pub(crate) fn solve_and_report(
    formula: &Formula,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) -> Result<SolveResult, String> {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    let solver_type: SolverType = common.solver.parse().map_err(|e| format!("{e}"))?;

    let time = Instant::now();
    let (result, solver_stats) = solve_with(formula.clone(), solver_type, &common.solver_config())
        .map_err(|e| e.to_string())?;
    let elapsed = time.elapsed();

    if common.verify {
        verify_solution(formula, &result)?;
    }

    if common.stats {
        print_stats(parse_time, elapsed, formula, &solver_stats, memory_usage());
    }

    if common.print_solution {
        if let Some(model) = result.model() {
            println!("Solution: {model}");
        }
    }

    println!("\n{}", verdict(&result));
    Ok(result)
}

const fn verdict(result: &SolveResult) -> &'static str {
    match result {
        SolveResult::Satisfiable(_) => "SATISFIABLE",
        SolveResult::Unsatisfiable => "UNSATISFIABLE",
        SolveResult::Exhausted => "UNKNOWN (search budget exhausted)",
    }
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    formula: &Formula,
    s: &SolutionStats,
    memory: Option<(f64, f64)>,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let literals: usize = formula.clauses().iter().map(|c| c.len()).sum();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", formula.num_vars());
    stat_line("Clauses", formula.num_clauses());
    stat_line("Literals", literals);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
    stat_line_with_rate("Simplify rounds", s.simplify_rounds, elapsed_secs);
    stat_line_with_rate("Restarts", s.restarts, elapsed_secs);
    stat_line_with_rate("Flips", s.flips, elapsed_secs);
    stat_line_with_rate("Freebie flips", s.freebies, elapsed_secs);
    if let Some((allocated, resident)) = memory {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_text_subcommand() {
        let cli = Cli::parse_from(["tristate-sat", "text", "--input", "1 0", "--solver", "incomplete", "--seed", "3"]);
        match cli.command {
            Some(Commands::Text { input, common }) => {
                assert_eq!(input, "1 0");
                assert_eq!(common.solver, "incomplete");
                assert_eq!(common.solver_config().walksat.seed, Some(3));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_unknown_solver_is_reported() {
        let cli = Cli::parse_from(["tristate-sat", "text", "--input", "1 0", "--solver", "genetic"]);
        let Some(Commands::Text { input, common }) = cli.command else {
            panic!("expected text command");
        };
        let err = solve_text(&input, &common).unwrap_err();
        assert!(err.contains("genetic"));
    }

    #[test]
    fn test_solve_text_complete() {
        let cli = Cli::parse_from(["tristate-sat", "text", "--input", "1 2 0\n-1 0"]);
        let Some(Commands::Text { input, common }) = cli.command else {
            panic!("expected text command");
        };
        assert!(solve_text(&input, &common).unwrap().is_sat());
    }
}
