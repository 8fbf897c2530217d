#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod assignment;
pub mod clause;
pub mod cnf;
pub mod configs;
pub mod dimacs;
pub mod dpll;
pub mod error;
pub mod generator;
pub mod literal;
pub mod simplify;
pub mod solver;
pub mod walksat;
