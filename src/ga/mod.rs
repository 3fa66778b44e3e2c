//! Genetic Algorithm over tours.
//!
//! The GA evolves a population of [`Candidate`](crate::objective::Candidate)
//! tours. Individuals are built by any [`Solver`](crate::solver::Solver),
//! recombined by a [`Crossover`](crate::operator::Crossover) and mutated by
//! any [`Operator`](crate::operator::Operator), usually a local search.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, tournament, presets)
//! - [`Tournament`]: Probabilistic tournament selection
//! - [`GaSolver`]: Executes the evolutionary loop
//! - [`GaResult`]: Final optimization result with statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod runner;
mod selection;

pub use config::GaConfig;
pub use runner::{GaResult, GaSolver, ReporterFn};
pub use selection::Tournament;
