//! # tristate-sat
//!
//! A command-line driver for the `tristate_sat` library. It reads CNF
//! formulas in DIMACS format, as plain text, or generates random k-CNF
//! formulas, and solves them with one of two methods:
//!
//! 1.  **complete**: backtracking search with pure-literal and unit-clause
//!     simplification. Finds a model or proves none exists.
//! 2.  **incomplete**: WalkSAT-style local search with random restarts. May
//!     report an exhausted budget on a satisfiable formula.
//!
//! ## Usage
//!
//! ```sh
//! tristate-sat problem.cnf
//! tristate-sat file --path problem.cnf --solver incomplete --flips 100 --restarts 20 --seed 7
//! tristate-sat text --input $'1 2 0\n-1 0' --print-solution
//! tristate-sat random -k 3 --vars 8 --clauses 30 --export-dimacs
//! tristate-sat dir --path benchmarks/
//! tristate-sat completions bash
//! ```
//!
//! Exit status is 10 for SATISFIABLE, 20 for UNSATISFIABLE, 0 when the local
//! search gave up, and 1 on errors.

use crate::command_line::cli::{
    Cli, Commands, CommonOptions, solve_dir, solve_path, solve_random, solve_text,
};
use clap::{CommandFactory, Parser};
use log::LevelFilter;
use std::process::ExitCode;
use tristate_sat::sat::solver::SolveResult;

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// statistics in the report.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Installs the logger. `--debug` lowers the default filter to `debug`;
/// `RUST_LOG` still overrides it.
fn init_logging(common: &CommonOptions) {
    let level = if common.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

const fn exit_code(result: &SolveResult) -> u8 {
    match result {
        SolveResult::Satisfiable(_) => 10,
        SolveResult::Unsatisfiable => 20,
        SolveResult::Exhausted => 0,
    }
}

fn finish(outcome: Result<SolveResult, String>) -> ExitCode {
    match outcome {
        Ok(result) => ExitCode::from(exit_code(&result)),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let common = match &cli.command {
        Some(
            Commands::File { common, .. }
            | Commands::Text { common, .. }
            | Commands::Random { common, .. }
            | Commands::Dir { common, .. },
        ) => common,
        Some(Commands::Completions { .. }) | None => &cli.common,
    };
    init_logging(common);

    match cli.command {
        Some(Commands::File { path, common }) => finish(solve_path(&path, &common)),
        Some(Commands::Text { input, common }) => finish(solve_text(&input, &common)),
        Some(Commands::Random {
            k,
            vars,
            clauses,
            export_dimacs,
            common,
        }) => finish(solve_random(k, vars, clauses, export_dimacs, &common)),
        Some(Commands::Dir { path, common }) => match solve_dir(&path, &common) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            ExitCode::SUCCESS
        }
        None => match cli.path {
            Some(path) => finish(solve_path(&path, &cli.common)),
            None => {
                eprintln!("No command provided. Use --help for more information.");
                ExitCode::FAILURE
            }
        },
    }
}
